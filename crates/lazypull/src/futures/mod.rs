mod cancel;
mod interrupt;
#[cfg(any(feature = "tokio", feature = "smol"))]
mod runtime;
mod sleep_provider;
mod timeout;
mod yield_now;

pub use cancel::*;
pub use interrupt::*;
#[cfg_attr(docsrs, doc(cfg(any(feature = "tokio", feature = "smol"))))]
#[cfg(any(feature = "tokio", feature = "smol"))]
pub use runtime::*;
pub use sleep_provider::*;
pub use timeout::*;
pub use yield_now::*;
