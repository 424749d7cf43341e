use core::iter::FusedIterator;

use crate::{
    error::Result,
    sequence::{AsyncEnumerator, AsyncSequence},
};

/// A synchronous, blocking view of an [`AsyncSequence`].
///
/// Created by [`AsyncSequenceExt::into_sync`]. Iterating `&SyncSequence`
/// yields `Result<Item>`s, blocking the current thread on every `advance`.
/// Converting it back with [`IntoAsyncSequence`] returns the original
/// sequence rather than wrapping the wrapper.
///
/// Do not iterate it from inside an async task: blocking there stalls the
/// executor.
///
/// # Example
/// ```
/// use lazypull::{AsyncSequenceExt, IntoAsyncSequence, iter};
///
/// let sync = iter(1..=3).map(|v| v * 10).into_sync();
/// let values: Result<Vec<_>, _> = sync.iter().collect();
/// assert_eq!(values.unwrap(), vec![10, 20, 30]);
///
/// // Crossing back returns the sequence that was bridged.
/// let _original = sync.into_async_sequence();
/// ```
///
/// [`AsyncSequenceExt::into_sync`]: crate::AsyncSequenceExt::into_sync
/// [`IntoAsyncSequence`]: crate::IntoAsyncSequence
#[derive(Debug, Clone)]
pub struct SyncSequence<S> {
    sequence: S,
}

impl<S> SyncSequence<S>
where
    S: AsyncSequence,
{
    pub(crate) const fn new(sequence: S) -> Self {
        Self { sequence }
    }

    /// Starts a blocking traversal.
    pub fn iter(&self) -> BlockingIter<S::Enumerator> {
        BlockingIter::new(self.sequence.enumerator())
    }

    /// Returns the bridged sequence.
    pub fn into_inner(self) -> S {
        self.sequence
    }

    /// Borrows the bridged sequence.
    pub const fn get_ref(&self) -> &S {
        &self.sequence
    }
}

impl<'a, S> IntoIterator for &'a SyncSequence<S>
where
    S: AsyncSequence,
{
    type Item = Result<S::Item>;
    type IntoIter = BlockingIter<S::Enumerator>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A blocking [`Iterator`] driving an [`AsyncEnumerator`].
///
/// Each call to `next` runs the try/advance loop until an element is found or
/// the sequence ends. After the first error or exhaustion it only returns
/// `None`.
#[derive(Debug)]
pub struct BlockingIter<E> {
    enumerator: Option<E>,
}

impl<E> BlockingIter<E>
where
    E: AsyncEnumerator,
{
    /// Wraps an enumerator.
    pub const fn new(enumerator: E) -> Self {
        Self {
            enumerator: Some(enumerator),
        }
    }
}

impl<E> Iterator for BlockingIter<E>
where
    E: AsyncEnumerator,
{
    type Item = Result<E::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        let enumerator = self.enumerator.as_mut()?;
        match enumerator.next_blocking() {
            Ok(Some(value)) => Some(Ok(value)),
            Ok(None) => {
                self.enumerator = None;
                None
            }
            Err(e) => {
                self.enumerator = None;
                Some(Err(e))
            }
        }
    }
}

impl<E> FusedIterator for BlockingIter<E> where E: AsyncEnumerator {}
