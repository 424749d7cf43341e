use core::time::Duration;

use thiserror::Error;

/// A result type defaulting to the crate-wide [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All errors that `lazypull` can produce.
///
/// Every variant is terminal: nothing in this crate retries. When a terminal
/// consumer fails, the enumerator chain it owns is still dropped on the way
/// out, and the original error is what reaches the caller.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// [`first`] or [`single`] was called on a sequence that produced no
    /// elements.
    ///
    /// [`first`]: crate::AsyncSequenceExt::first
    /// [`single`]: crate::AsyncSequenceExt::single
    #[error("sequence contains no elements")]
    EmptySequence,

    /// [`single`] or [`single_or_default`] observed a second element.
    ///
    /// [`single`]: crate::AsyncSequenceExt::single
    /// [`single_or_default`]: crate::AsyncSequenceExt::single_or_default
    #[error("sequence contains more than one element")]
    MultipleElements,

    /// The cancellation signal was already set when a protocol call was made,
    /// or was set while `advance` was suspended.
    #[error("operation was cancelled")]
    Cancelled,

    /// A single `advance` did not complete within the configured duration.
    #[error("advance timed out after {0:?}")]
    TimedOut(Duration),

    /// The reader behind a producer failed.
    #[error("producer I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// A producer read bytes it could not decode.
    #[error("invalid data: {0}")]
    InvalidData(String),
}
