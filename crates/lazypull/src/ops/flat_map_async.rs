use core::{
    future::{Future, poll_fn},
    pin::Pin,
};
use std::sync::Arc;

use crate::{
    error::Result,
    sequence::{AsyncEnumerator, AsyncSequence, IntoAsyncSequence},
};

/// Inner enumerator type opened by [`FlatMapAsync`] for a selector result `Q`.
type InnerOf<Q> = <<Q as IntoAsyncSequence>::Sequence as AsyncSequence>::Enumerator;

/// Sequence returned by [`AsyncSequenceExt::flat_map_async`].
///
/// [`AsyncSequenceExt::flat_map_async`]: crate::AsyncSequenceExt::flat_map_async
pub struct FlatMapAsync<S, F> {
    source: S,
    f: Arc<F>,
}

impl<S, F> FlatMapAsync<S, F> {
    pub(crate) fn new(source: S, f: F) -> Self {
        Self {
            source,
            f: Arc::new(f),
        }
    }
}

impl<S, F> Clone for FlatMapAsync<S, F>
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

impl<S, Q, F> AsyncSequence for FlatMapAsync<S, F>
where
    S: AsyncSequence,
    F: Fn(S::Item) -> Q,
    Q: IntoAsyncSequence,
{
    type Item = Q::Item;
    type Enumerator = FlatMapAsyncEnumerator<S::Enumerator, F, InnerOf<Q>>;

    fn enumerator(&self) -> Self::Enumerator {
        FlatMapAsyncEnumerator {
            inner: None,
            source: self.source.enumerator(),
            f: Arc::clone(&self.f),
        }
    }
}

/// Enumerator for [`FlatMapAsync`].
///
/// `try_get_next` only ever reads from the current inner enumerator. Opening
/// the next inner sequence happens in `advance`: when the current inner
/// reports exhaustion it is dropped, the next source element is pulled, and
/// a fresh inner enumerator is opened. That `advance` then reports `true`
/// without touching the new inner, which is fine since a `true` advance may
/// still be followed by an empty `try_get_next`.
pub struct FlatMapAsyncEnumerator<E, F, I> {
    inner: Option<I>,
    source: E,
    f: Arc<F>,
}

impl<E, Q, F, I> AsyncEnumerator for FlatMapAsyncEnumerator<E, F, I>
where
    E: AsyncEnumerator,
    F: Fn(E::Item) -> Q,
    Q: IntoAsyncSequence,
    Q::Sequence: AsyncSequence<Enumerator = I>,
    I: AsyncEnumerator<Item = Q::Item>,
{
    type Item = Q::Item;

    fn try_get_next(&mut self) -> Option<Self::Item> {
        self.inner.as_mut()?.try_get_next()
    }

    async fn advance(&mut self) -> Result<bool> {
        if let Some(inner) = self.inner.as_mut() {
            if inner.advance().await? {
                return Ok(true);
            }
            self.inner = None;
        }

        let Some(value) = self.source.next().await? else {
            return Ok(false);
        };
        self.inner = Some((self.f)(value).into_async_sequence().enumerator());
        Ok(true)
    }
}

/// Sequence returned by [`AsyncSequenceExt::flat_map_future`].
///
/// [`AsyncSequenceExt::flat_map_future`]: crate::AsyncSequenceExt::flat_map_future
pub struct FlatMapFuture<S, F> {
    source: S,
    f: Arc<F>,
}

impl<S, F> FlatMapFuture<S, F> {
    pub(crate) fn new(source: S, f: F) -> Self {
        Self {
            source,
            f: Arc::new(f),
        }
    }
}

impl<S, F> Clone for FlatMapFuture<S, F>
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

impl<S, C, Fut, F> AsyncSequence for FlatMapFuture<S, F>
where
    S: AsyncSequence,
    F: Fn(S::Item) -> Fut,
    Fut: Future<Output = C>,
    C: IntoIterator,
{
    type Item = C::Item;
    type Enumerator = FlatMapFutureEnumerator<S::Enumerator, F, Fut, C::IntoIter>;

    fn enumerator(&self) -> Self::Enumerator {
        FlatMapFutureEnumerator {
            inner: None,
            pending: None,
            source: self.source.enumerator(),
            f: Arc::clone(&self.f),
        }
    }
}

/// Enumerator for [`FlatMapFuture`].
///
/// `advance` pulls one source element and awaits its selector, leaving the
/// resolved collection for `try_get_next` to drain. The selector future is
/// held by the enumerator until it completes, so an `advance` dropped midway
/// is resumed by the next one.
pub struct FlatMapFutureEnumerator<E, F, Fut, I> {
    inner: Option<I>,
    pending: Option<Pin<Box<Fut>>>,
    source: E,
    f: Arc<F>,
}

impl<E, C, Fut, F, I> AsyncEnumerator for FlatMapFutureEnumerator<E, F, Fut, I>
where
    E: AsyncEnumerator,
    F: Fn(E::Item) -> Fut,
    Fut: Future<Output = C>,
    C: IntoIterator<IntoIter = I>,
    I: Iterator<Item = C::Item>,
{
    type Item = C::Item;

    fn try_get_next(&mut self) -> Option<Self::Item> {
        self.inner.as_mut()?.next()
    }

    async fn advance(&mut self) -> Result<bool> {
        if self.pending.is_none() {
            self.inner = None;
            let Some(value) = self.source.next().await? else {
                return Ok(false);
            };
            self.pending = Some(Box::pin((self.f)(value)));
        }
        if let Some(fut) = &mut self.pending {
            let collection = poll_fn(|cx| fut.as_mut().poll(cx)).await;
            self.pending = None;
            self.inner = Some(collection.into_iter());
        }
        Ok(true)
    }
}
