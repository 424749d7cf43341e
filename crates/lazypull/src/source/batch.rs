use std::collections::VecDeque;

use crate::{
    error::Result,
    futures::yield_now,
    sequence::{AsyncEnumerator, AsyncSequence},
};

/// Splits a synchronous collection into batches of `batch_size` elements,
/// suspending once before each batch.
///
/// Within a batch every element is available through `try_get_next`; only
/// crossing into the next batch requires an `advance`. This mimics producers
/// that receive data in chunks (network frames, pages of query results) and
/// makes it easy to check that a pipeline's output does not depend on how the
/// input is chunked.
///
/// A `batch_size` of zero is treated as one.
///
/// # Example
/// ```
/// use lazypull::{AsyncEnumerator, AsyncSequence, batched};
///
/// # futures::executor::block_on(async {
/// let mut e = batched(1..=5, 2).enumerator();
/// assert_eq!(e.try_get_next(), None);
/// assert!(e.advance().await?);
/// assert_eq!(e.try_get_next(), Some(1));
/// assert_eq!(e.try_get_next(), Some(2));
/// assert_eq!(e.try_get_next(), None);
/// # Ok::<_, lazypull::Error>(())
/// # }).unwrap();
/// ```
pub fn batched<I>(iterable: I, batch_size: usize) -> Batched<I>
where
    I: IntoIterator + Clone,
{
    Batched {
        iterable,
        batch_size: batch_size.max(1),
    }
}

/// Sequence returned by [`batched`].
#[derive(Debug, Clone)]
pub struct Batched<I> {
    iterable: I,
    batch_size: usize,
}

impl<I> AsyncSequence for Batched<I>
where
    I: IntoIterator + Clone,
{
    type Item = I::Item;
    type Enumerator = BatchedEnumerator<I::IntoIter>;

    fn enumerator(&self) -> Self::Enumerator {
        BatchedEnumerator {
            buffer: VecDeque::with_capacity(self.batch_size),
            iter: self.iterable.clone().into_iter(),
            batch_size: self.batch_size,
        }
    }
}

/// Enumerator for [`Batched`].
#[derive(Debug)]
pub struct BatchedEnumerator<I>
where
    I: Iterator,
{
    buffer: VecDeque<I::Item>,
    iter: I,
    batch_size: usize,
}

impl<I> AsyncEnumerator for BatchedEnumerator<I>
where
    I: Iterator,
{
    type Item = I::Item;

    fn try_get_next(&mut self) -> Option<Self::Item> {
        self.buffer.pop_front()
    }

    async fn advance(&mut self) -> Result<bool> {
        if !self.buffer.is_empty() {
            return Ok(true);
        }
        yield_now().await;
        self.buffer.extend(self.iter.by_ref().take(self.batch_size));
        #[cfg(feature = "tracing")]
        tracing::trace!(len = self.buffer.len(), "refilled batch");
        Ok(!self.buffer.is_empty())
    }
}
