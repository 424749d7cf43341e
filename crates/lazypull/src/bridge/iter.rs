use crate::{
    error::Result,
    sequence::{AsyncEnumerator, AsyncSequence},
};

/// Lifts a synchronous collection into an [`AsyncSequence`].
///
/// Every enumeration clones `iterable` and walks it; nothing ever suspends.
/// Cheap-to-clone iterables (ranges, slices, `iter().copied()`) make
/// re-enumeration free.
///
/// # Example
/// ```
/// use lazypull::{AsyncSequenceExt, iter};
///
/// # futures::executor::block_on(async {
/// let evens = iter(1..=6).filter(|v| v % 2 == 0).to_list().await?;
/// assert_eq!(evens, vec![2, 4, 6]);
/// # Ok::<_, lazypull::Error>(())
/// # }).unwrap();
/// ```
pub fn iter<I>(iterable: I) -> IterSequence<I>
where
    I: IntoIterator + Clone,
{
    IterSequence { iterable }
}

/// An [`AsyncSequence`] over a synchronous collection. See [`iter`].
#[derive(Debug, Clone)]
pub struct IterSequence<I> {
    iterable: I,
}

impl<I> IterSequence<I> {
    /// Returns the wrapped collection.
    pub fn into_inner(self) -> I {
        self.iterable
    }

    /// Borrows the wrapped collection.
    pub const fn get_ref(&self) -> &I {
        &self.iterable
    }
}

impl<I> AsyncSequence for IterSequence<I>
where
    I: IntoIterator + Clone,
{
    type Item = I::Item;
    type Enumerator = IterEnumerator<I::IntoIter>;

    fn enumerator(&self) -> Self::Enumerator {
        IterEnumerator::new(self.iterable.clone().into_iter())
    }
}

/// Enumerator over a host [`Iterator`].
///
/// `advance` moves the iterator and reports whether it found an element, with
/// no suspension. `try_get_next` transfers that one element out; it stays
/// consumed until the next `advance`.
#[derive(Debug)]
pub struct IterEnumerator<I>
where
    I: Iterator,
{
    current: Option<I::Item>,
    iter: I,
}

impl<I> IterEnumerator<I>
where
    I: Iterator,
{
    /// Wraps a host iterator.
    pub const fn new(iter: I) -> Self {
        Self {
            current: None,
            iter,
        }
    }
}

impl<I> AsyncEnumerator for IterEnumerator<I>
where
    I: Iterator,
{
    type Item = I::Item;

    fn try_get_next(&mut self) -> Option<Self::Item> {
        self.current.take()
    }

    async fn advance(&mut self) -> Result<bool> {
        self.current = self.iter.next();
        Ok(self.current.is_some())
    }

    fn next_blocking(&mut self) -> Result<Option<Self::Item>> {
        Ok(self.current.take().or_else(|| self.iter.next()))
    }
}
