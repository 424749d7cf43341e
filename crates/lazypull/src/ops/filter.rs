use core::future::Future;
use std::sync::Arc;

use crate::{
    error::Result,
    sequence::{AsyncEnumerator, AsyncSequence},
};

/// Sequence returned by [`AsyncSequenceExt::filter`].
///
/// [`AsyncSequenceExt::filter`]: crate::AsyncSequenceExt::filter
pub struct Filter<S, F> {
    source: S,
    predicate: Arc<F>,
}

impl<S, F> Filter<S, F> {
    pub(crate) fn new(source: S, predicate: F) -> Self {
        Self {
            source,
            predicate: Arc::new(predicate),
        }
    }
}

impl<S, F> Clone for Filter<S, F>
where
    S: Clone,
{
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            predicate: Arc::clone(&self.predicate),
        }
    }
}

impl<S, F> AsyncSequence for Filter<S, F>
where
    S: AsyncSequence,
    F: Fn(&S::Item) -> bool,
{
    type Item = S::Item;
    type Enumerator = FilterEnumerator<S::Enumerator, F>;

    fn enumerator(&self) -> Self::Enumerator {
        FilterEnumerator {
            source: self.source.enumerator(),
            predicate: Arc::clone(&self.predicate),
        }
    }
}

/// Enumerator for [`Filter`].
///
/// `try_get_next` discards buffered non-matching elements synchronously and
/// gives up as soon as the source needs to suspend.
pub struct FilterEnumerator<E, F> {
    source: E,
    predicate: Arc<F>,
}

impl<E, F> AsyncEnumerator for FilterEnumerator<E, F>
where
    E: AsyncEnumerator,
    F: Fn(&E::Item) -> bool,
{
    type Item = E::Item;

    fn try_get_next(&mut self) -> Option<Self::Item> {
        while let Some(value) = self.source.try_get_next() {
            if (self.predicate)(&value) {
                return Some(value);
            }
        }
        None
    }

    fn advance(&mut self) -> impl Future<Output = Result<bool>> {
        self.source.advance()
    }
}
