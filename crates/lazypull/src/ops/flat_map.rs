use core::future::Future;
use std::sync::Arc;

use crate::{
    error::Result,
    sequence::{AsyncEnumerator, AsyncSequence},
};

/// Sequence returned by [`AsyncSequenceExt::flat_map`].
///
/// [`AsyncSequenceExt::flat_map`]: crate::AsyncSequenceExt::flat_map
pub struct FlatMap<S, F> {
    source: S,
    f: Arc<F>,
}

impl<S, F> FlatMap<S, F> {
    pub(crate) fn new(source: S, f: F) -> Self {
        Self {
            source,
            f: Arc::new(f),
        }
    }
}

impl<S, F> Clone for FlatMap<S, F>
where
    S: Clone,
{
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            f: Arc::clone(&self.f),
        }
    }
}

impl<S, C, F> AsyncSequence for FlatMap<S, F>
where
    S: AsyncSequence,
    F: Fn(S::Item) -> C,
    C: IntoIterator,
{
    type Item = C::Item;
    type Enumerator = FlatMapEnumerator<S::Enumerator, F, C::IntoIter>;

    fn enumerator(&self) -> Self::Enumerator {
        FlatMapEnumerator {
            inner: None,
            source: self.source.enumerator(),
            f: Arc::clone(&self.f),
        }
    }
}

/// Enumerator for [`FlatMap`].
///
/// Since the inner collections are synchronous, every suspension comes from
/// the source: `try_get_next` keeps opening inner iterators for as long as
/// the source hands out elements without suspending.
pub struct FlatMapEnumerator<E, F, I> {
    inner: Option<I>,
    source: E,
    f: Arc<F>,
}

impl<E, C, F, I> AsyncEnumerator for FlatMapEnumerator<E, F, I>
where
    E: AsyncEnumerator,
    F: Fn(E::Item) -> C,
    C: IntoIterator<IntoIter = I>,
    I: Iterator<Item = C::Item>,
{
    type Item = C::Item;

    fn try_get_next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(value) = self.inner.as_mut().and_then(Iterator::next) {
                return Some(value);
            }
            self.inner = None;
            let value = self.source.try_get_next()?;
            self.inner = Some((self.f)(value).into_iter());
        }
    }

    fn advance(&mut self) -> impl Future<Output = Result<bool>> {
        self.source.advance()
    }
}
