mod batch;
mod empty;
mod lines;

pub use batch::*;
pub use empty::*;
pub use lines::*;
