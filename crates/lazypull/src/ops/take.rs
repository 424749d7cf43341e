use std::sync::Arc;

use crate::{
    error::Result,
    sequence::{AsyncEnumerator, AsyncSequence},
};

/// Sequence returned by [`AsyncSequenceExt::take`].
///
/// [`AsyncSequenceExt::take`]: crate::AsyncSequenceExt::take
#[derive(Debug, Clone)]
pub struct Take<S> {
    source: S,
    count: usize,
}

impl<S> Take<S> {
    pub(crate) const fn new(source: S, count: usize) -> Self {
        Self { source, count }
    }
}

impl<S> AsyncSequence for Take<S>
where
    S: AsyncSequence,
{
    type Item = S::Item;
    type Enumerator = TakeEnumerator<S::Enumerator>;

    fn enumerator(&self) -> Self::Enumerator {
        TakeEnumerator {
            source: self.source.enumerator(),
            remaining: self.count,
        }
    }
}

/// Enumerator for [`Take`].
///
/// Once the count is spent, `advance` reports exhaustion without touching
/// the source again.
#[derive(Debug)]
pub struct TakeEnumerator<E> {
    source: E,
    remaining: usize,
}

impl<E> AsyncEnumerator for TakeEnumerator<E>
where
    E: AsyncEnumerator,
{
    type Item = E::Item;

    fn try_get_next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let value = self.source.try_get_next()?;
        self.remaining -= 1;
        Some(value)
    }

    async fn advance(&mut self) -> Result<bool> {
        if self.remaining == 0 {
            return Ok(false);
        }
        self.source.advance().await
    }
}

/// Sequence returned by [`AsyncSequenceExt::take_while`].
///
/// [`AsyncSequenceExt::take_while`]: crate::AsyncSequenceExt::take_while
pub struct TakeWhile<S, F> {
    source: S,
    predicate: Arc<F>,
}

impl<S, F> TakeWhile<S, F> {
    pub(crate) fn new(source: S, predicate: F) -> Self {
        Self {
            source,
            predicate: Arc::new(predicate),
        }
    }
}

impl<S, F> Clone for TakeWhile<S, F>
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

impl<S, F> AsyncSequence for TakeWhile<S, F>
where
    S: AsyncSequence,
    F: Fn(&S::Item) -> bool,
{
    type Item = S::Item;
    type Enumerator = TakeWhileEnumerator<S::Enumerator, F>;

    fn enumerator(&self) -> Self::Enumerator {
        TakeWhileEnumerator {
            source: self.source.enumerator(),
            predicate: Arc::clone(&self.predicate),
            done: false,
        }
    }
}

/// Enumerator for [`TakeWhile`].
///
/// The first element failing the predicate is dropped and ends the
/// traversal for good.
pub struct TakeWhileEnumerator<E, F> {
    source: E,
    predicate: Arc<F>,
    done: bool,
}

impl<E, F> AsyncEnumerator for TakeWhileEnumerator<E, F>
where
    E: AsyncEnumerator,
    F: Fn(&E::Item) -> bool,
{
    type Item = E::Item;

    fn try_get_next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let value = self.source.try_get_next()?;
        if (self.predicate)(&value) {
            Some(value)
        } else {
            self.done = true;
            None
        }
    }

    async fn advance(&mut self) -> Result<bool> {
        if self.done {
            return Ok(false);
        }
        self.source.advance().await
    }
}
