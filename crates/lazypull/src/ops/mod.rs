//! Transform operators and the join operator.
//!
//! Every operator is a plain sequence value holding its source and its
//! closures (behind an `Arc`, shared by every enumerator it creates), plus an
//! enumerator type holding the per-traversal state.

mod filter;
mod flat_map;
mod flat_map_async;
mod join;
mod map;
mod skip;
mod take;
mod then;
#[cfg(test)]
mod tests;

pub use filter::*;
pub use flat_map::*;
pub use flat_map_async::*;
pub use join::*;
pub use map::*;
pub use skip::*;
pub use take::*;
pub use then::*;
