mod ext;
mod interface;

pub use ext::*;
pub use interface::*;
