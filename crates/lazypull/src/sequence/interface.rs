use core::future::Future;

use crate::{bridge::SyncSequence, error::Result};

/// One live traversal over an [`AsyncSequence`].
///
/// The protocol has two phases:
///
/// - [`try_get_next`] hands out an element if one is available *without*
///   suspending. It may loop synchronously (a filter discarding buffered
///   non-matching elements) but must never await anything.
/// - [`advance`] is the only suspension point. It resolves to `Ok(true)` once
///   at least one more element may be obtainable through [`try_get_next`], or
///   to `Ok(false)` when the sequence is permanently exhausted.
///
/// A consumer alternates between the two:
///
/// ```
/// use lazypull::{AsyncEnumerator, AsyncSequence, Result};
///
/// async fn drain<S: AsyncSequence>(seq: &S) -> Result<Vec<S::Item>> {
///     let mut e = seq.enumerator();
///     let mut out = Vec::new();
///     loop {
///         while let Some(v) = e.try_get_next() {
///             out.push(v);
///         }
///         if !e.advance().await? {
///             break Ok(out);
///         }
///     }
/// }
/// ```
///
/// After `Ok(true)` a following [`try_get_next`] is allowed to return `None`
/// again; the consumer simply advances again.
///
/// Enumerators are released by dropping them. Operators that wrap other
/// enumerators drop them in field order, so nested cursors go first.
///
/// [`try_get_next`]: AsyncEnumerator::try_get_next
/// [`advance`]: AsyncEnumerator::advance
pub trait AsyncEnumerator {
    /// The element type produced by this traversal.
    type Item;

    /// Returns the next element if it is available without suspending.
    fn try_get_next(&mut self) -> Option<Self::Item>;

    /// Suspends until more elements may be obtainable or the sequence ends.
    ///
    /// # Errors
    ///
    /// Returns an error if the producer fails, or if a decorator observes
    /// cancellation or a timeout.
    fn advance(&mut self) -> impl Future<Output = Result<bool>>;

    /// Returns a future resolving to the next element, running the
    /// try/advance loop once.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`AsyncEnumerator::advance`].
    fn next(&mut self) -> impl Future<Output = Result<Option<Self::Item>>> {
        async move {
            loop {
                if let Some(value) = self.try_get_next() {
                    return Ok(Some(value));
                }
                if !self.advance().await? {
                    return Ok(None);
                }
            }
        }
    }

    /// Blocks the current thread until the next element or exhaustion.
    ///
    /// This is the pull used by [`BlockingIter`]. Enumerators that are already
    /// synchronous underneath override it to skip the executor entirely.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`AsyncEnumerator::advance`].
    ///
    /// [`BlockingIter`]: crate::BlockingIter
    fn next_blocking(&mut self) -> Result<Option<Self::Item>> {
        futures::executor::block_on(self.next())
    }
}

/// A re-enumerable source of [`AsyncEnumerator`]s.
///
/// Creating an enumerator must be cheap and side-effect free: no I/O and no
/// suspension. Producers that need to open a resource do so on the first
/// [`AsyncEnumerator::advance`].
pub trait AsyncSequence {
    /// The element type of every traversal.
    type Item;
    /// The enumerator type returned by [`AsyncSequence::enumerator`].
    type Enumerator: AsyncEnumerator<Item = Self::Item>;

    /// Starts a new, independent traversal.
    fn enumerator(&self) -> Self::Enumerator;
}

/// Conversion into an [`AsyncSequence`].
///
/// Every sequence converts into itself. A [`SyncSequence`] converts back into
/// the sequence it bridges, so crossing the sync/async boundary twice never
/// stacks wrappers.
pub trait IntoAsyncSequence {
    /// The element type of the resulting sequence.
    type Item;
    /// The resulting sequence.
    type Sequence: AsyncSequence<Item = Self::Item>;

    /// Performs the conversion.
    fn into_async_sequence(self) -> Self::Sequence;
}

impl<S> IntoAsyncSequence for S
where
    S: AsyncSequence,
{
    type Item = S::Item;
    type Sequence = S;

    fn into_async_sequence(self) -> Self::Sequence {
        self
    }
}

impl<S> IntoAsyncSequence for SyncSequence<S>
where
    S: AsyncSequence,
{
    type Item = S::Item;
    type Sequence = S;

    fn into_async_sequence(self) -> Self::Sequence {
        self.into_inner()
    }
}
