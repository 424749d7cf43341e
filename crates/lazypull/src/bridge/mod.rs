mod blocking;
mod iter;

pub use blocking::*;
pub use iter::*;
