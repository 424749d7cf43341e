#[cfg(feature = "smol")]
mod smol;
#[cfg(feature = "tokio")]
mod tokio;

#[cfg_attr(docsrs, doc(cfg(feature = "smol")))]
#[cfg(feature = "smol")]
pub use self::smol::*;
#[cfg_attr(docsrs, doc(cfg(feature = "tokio")))]
#[cfg(feature = "tokio")]
pub use self::tokio::*;
