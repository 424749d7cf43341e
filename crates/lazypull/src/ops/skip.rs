use core::future::Future;
use std::sync::Arc;

use crate::{
    error::Result,
    sequence::{AsyncEnumerator, AsyncSequence},
};

/// Sequence returned by [`AsyncSequenceExt::skip`].
///
/// [`AsyncSequenceExt::skip`]: crate::AsyncSequenceExt::skip
#[derive(Debug, Clone)]
pub struct Skip<S> {
    source: S,
    count: usize,
}

impl<S> Skip<S> {
    pub(crate) const fn new(source: S, count: usize) -> Self {
        Self { source, count }
    }
}

impl<S> AsyncSequence for Skip<S>
where
    S: AsyncSequence,
{
    type Item = S::Item;
    type Enumerator = SkipEnumerator<S::Enumerator>;

    fn enumerator(&self) -> Self::Enumerator {
        SkipEnumerator {
            source: self.source.enumerator(),
            remaining: self.count,
        }
    }
}

/// Enumerator for [`Skip`].
#[derive(Debug)]
pub struct SkipEnumerator<E> {
    source: E,
    remaining: usize,
}

impl<E> AsyncEnumerator for SkipEnumerator<E>
where
    E: AsyncEnumerator,
{
    type Item = E::Item;

    fn try_get_next(&mut self) -> Option<Self::Item> {
        while self.remaining > 0 {
            self.source.try_get_next()?;
            self.remaining -= 1;
        }
        self.source.try_get_next()
    }

    fn advance(&mut self) -> impl Future<Output = Result<bool>> {
        self.source.advance()
    }
}

/// Sequence returned by [`AsyncSequenceExt::skip_while`].
///
/// [`AsyncSequenceExt::skip_while`]: crate::AsyncSequenceExt::skip_while
pub struct SkipWhile<S, F> {
    source: S,
    predicate: Arc<F>,
}

impl<S, F> SkipWhile<S, F> {
    pub(crate) fn new(source: S, predicate: F) -> Self {
        Self {
            source,
            predicate: Arc::new(predicate),
        }
    }
}

impl<S, F> Clone for SkipWhile<S, F>
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

impl<S, F> AsyncSequence for SkipWhile<S, F>
where
    S: AsyncSequence,
    F: Fn(&S::Item) -> bool,
{
    type Item = S::Item;
    type Enumerator = SkipWhileEnumerator<S::Enumerator, F>;

    fn enumerator(&self) -> Self::Enumerator {
        SkipWhileEnumerator {
            source: self.source.enumerator(),
            predicate: Arc::clone(&self.predicate),
            skipping: true,
        }
    }
}

/// Enumerator for [`SkipWhile`].
///
/// The predicate is not consulted again after the first element it rejects.
pub struct SkipWhileEnumerator<E, F> {
    source: E,
    predicate: Arc<F>,
    skipping: bool,
}

impl<E, F> AsyncEnumerator for SkipWhileEnumerator<E, F>
where
    E: AsyncEnumerator,
    F: Fn(&E::Item) -> bool,
{
    type Item = E::Item;

    fn try_get_next(&mut self) -> Option<Self::Item> {
        if !self.skipping {
            return self.source.try_get_next();
        }
        while let Some(value) = self.source.try_get_next() {
            if !(self.predicate)(&value) {
                self.skipping = false;
                return Some(value);
            }
        }
        None
    }

    fn advance(&mut self) -> impl Future<Output = Result<bool>> {
        self.source.advance()
    }
}
