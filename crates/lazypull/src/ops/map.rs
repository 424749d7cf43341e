use core::future::Future;
use std::sync::Arc;

use crate::{
    error::Result,
    sequence::{AsyncEnumerator, AsyncSequence},
};

/// Sequence returned by [`AsyncSequenceExt::map`].
///
/// [`AsyncSequenceExt::map`]: crate::AsyncSequenceExt::map
pub struct Map<S, F> {
    source: S,
    f: Arc<F>,
}

impl<S, F> Map<S, F> {
    pub(crate) fn new(source: S, f: F) -> Self {
        Self {
            source,
            f: Arc::new(f),
        }
    }
}

impl<S, F> Clone for Map<S, F>
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

impl<S, U, F> AsyncSequence for Map<S, F>
where
    S: AsyncSequence,
    F: Fn(S::Item) -> U,
{
    type Item = U;
    type Enumerator = MapEnumerator<S::Enumerator, F>;

    fn enumerator(&self) -> Self::Enumerator {
        MapEnumerator {
            source: self.source.enumerator(),
            f: Arc::clone(&self.f),
        }
    }
}

/// Enumerator for [`Map`].
pub struct MapEnumerator<E, F> {
    source: E,
    f: Arc<F>,
}

impl<E, U, F> AsyncEnumerator for MapEnumerator<E, F>
where
    E: AsyncEnumerator,
    F: Fn(E::Item) -> U,
{
    type Item = U;

    fn try_get_next(&mut self) -> Option<Self::Item> {
        self.source.try_get_next().map(&*self.f)
    }

    fn advance(&mut self) -> impl Future<Output = Result<bool>> {
        self.source.advance()
    }
}
