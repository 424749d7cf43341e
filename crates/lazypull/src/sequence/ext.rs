use core::{future::Future, hash::Hash, time::Duration};

use crate::{
    bridge::SyncSequence,
    consume,
    error::Result,
    futures::{CancelSignal, SleepProvider, WithCancellation, WithTimeout},
    ops::{
        Filter, FlatMap, FlatMapAsync, FlatMapFuture, Join, Map, Skip, SkipWhile, Take, TakeWhile,
        Then,
    },
    sequence::{AsyncSequence, IntoAsyncSequence},
};

/// Combinators and terminal consumers for every [`AsyncSequence`].
///
/// Combinators are lazy: they only describe a pipeline. Nothing is pulled
/// until a terminal consumer (or a hand-written consumer loop) drives an
/// enumerator.
///
/// # Example
/// ```
/// use lazypull::{AsyncSequenceExt, batched};
///
/// # futures::executor::block_on(async {
/// let seq = batched(1..=20, 4)
///     .skip_while(|v| *v < 5)
///     .filter(|v| v % 3 == 0)
///     .map(|v| v * 2)
///     .take(3);
///
/// assert_eq!(seq.to_list().await?, vec![12, 18, 24]);
/// assert_eq!(seq.count().await?, 3);
/// # Ok::<_, lazypull::Error>(())
/// # }).unwrap();
/// ```
pub trait AsyncSequenceExt: AsyncSequence + Sized {
    /// Keeps the elements for which `predicate` holds.
    fn filter<F>(self, predicate: F) -> Filter<Self, F>
    where
        F: Fn(&Self::Item) -> bool,
    {
        Filter::new(self, predicate)
    }

    /// Projects every element through a synchronous function.
    fn map<U, F>(self, f: F) -> Map<Self, F>
    where
        F: Fn(Self::Item) -> U,
    {
        Map::new(self, f)
    }

    /// Projects every element through an asynchronous function.
    ///
    /// Each output element costs exactly one suspension: the selector future
    /// is staged by `try_get_next` and resolved by the following `advance`.
    fn then<Fut, F>(self, f: F) -> Then<Self, F>
    where
        F: Fn(Self::Item) -> Fut,
        Fut: Future,
    {
        Then::new(self, f)
    }

    /// Flattens a synchronous collection produced for every element.
    fn flat_map<C, F>(self, f: F) -> FlatMap<Self, F>
    where
        F: Fn(Self::Item) -> C,
        C: IntoIterator,
    {
        FlatMap::new(self, f)
    }

    /// Flattens an asynchronous sequence produced for every element.
    fn flat_map_async<Q, F>(self, f: F) -> FlatMapAsync<Self, F>
    where
        F: Fn(Self::Item) -> Q,
        Q: IntoAsyncSequence,
    {
        FlatMapAsync::new(self, f)
    }

    /// Flattens a synchronous collection that the selector resolves
    /// asynchronously.
    fn flat_map_future<C, Fut, F>(self, f: F) -> FlatMapFuture<Self, F>
    where
        F: Fn(Self::Item) -> Fut,
        Fut: Future<Output = C>,
        C: IntoIterator,
    {
        FlatMapFuture::new(self, f)
    }

    /// Yields at most `count` elements.
    fn take(self, count: usize) -> Take<Self> {
        Take::new(self, count)
    }

    /// Yields elements until `predicate` first fails.
    fn take_while<F>(self, predicate: F) -> TakeWhile<Self, F>
    where
        F: Fn(&Self::Item) -> bool,
    {
        TakeWhile::new(self, predicate)
    }

    /// Skips the first `count` elements.
    fn skip(self, count: usize) -> Skip<Self> {
        Skip::new(self, count)
    }

    /// Skips leading elements while `predicate` holds.
    fn skip_while<F>(self, predicate: F) -> SkipWhile<Self, F>
    where
        F: Fn(&Self::Item) -> bool,
    {
        SkipWhile::new(self, predicate)
    }

    /// Inner equality join against `right`.
    ///
    /// The right sequence is drained once, on the first `advance`, into a
    /// key lookup. Left elements stream through; each is paired with every
    /// right element sharing its key, in right-side order.
    fn join<R, K, O, LK, RK, F>(
        self,
        right: R,
        left_key: LK,
        right_key: RK,
        result: F,
    ) -> Join<Self, R::Sequence, LK, RK, F>
    where
        R: IntoAsyncSequence,
        K: Eq + Hash,
        LK: Fn(&Self::Item) -> K,
        RK: Fn(&R::Item) -> K,
        F: Fn(&Self::Item, &R::Item) -> O,
    {
        Join::new(self, right.into_async_sequence(), left_key, right_key, result)
    }

    /// Observes `signal` on every protocol call of every enumerator.
    fn with_cancellation<C>(self, signal: C) -> WithCancellation<Self, C>
    where
        C: CancelSignal + Clone,
    {
        WithCancellation::new(self, signal)
    }

    /// Fails any single `advance` that takes longer than `duration`, timed
    /// with `S`.
    fn with_timeout<S>(self, duration: Duration) -> WithTimeout<Self, S>
    where
        S: SleepProvider,
    {
        WithTimeout::new(self, duration)
    }

    /// Bridges this sequence to blocking, synchronous iteration.
    fn into_sync(self) -> SyncSequence<Self> {
        SyncSequence::new(self)
    }

    /// Collects every element, in order.
    ///
    /// # Errors
    ///
    /// Propagates any error from the enumerator chain.
    fn to_list(&self) -> impl Future<Output = Result<Vec<Self::Item>>> {
        consume::to_list(self.enumerator())
    }

    /// Returns the first element.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptySequence`] if there are no elements.
    ///
    /// [`Error::EmptySequence`]: crate::Error::EmptySequence
    fn first(&self) -> impl Future<Output = Result<Self::Item>> {
        consume::first(self.enumerator())
    }

    /// Returns the first element, or `Item::default()` if there is none.
    ///
    /// # Errors
    ///
    /// Propagates any error from the enumerator chain.
    fn first_or_default(&self) -> impl Future<Output = Result<Self::Item>>
    where
        Self::Item: Default,
    {
        consume::first_or_default(self.enumerator())
    }

    /// Returns the only element.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptySequence`] if there are no elements and
    /// [`Error::MultipleElements`] as soon as a second one is seen.
    ///
    /// [`Error::EmptySequence`]: crate::Error::EmptySequence
    /// [`Error::MultipleElements`]: crate::Error::MultipleElements
    fn single(&self) -> impl Future<Output = Result<Self::Item>> {
        consume::single(self.enumerator())
    }

    /// Returns the only element, or `Item::default()` if there is none.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MultipleElements`] as soon as a second element is
    /// seen.
    ///
    /// [`Error::MultipleElements`]: crate::Error::MultipleElements
    fn single_or_default(&self) -> impl Future<Output = Result<Self::Item>>
    where
        Self::Item: Default,
    {
        consume::single_or_default(self.enumerator())
    }

    /// Counts every element.
    ///
    /// # Errors
    ///
    /// Propagates any error from the enumerator chain.
    fn count(&self) -> impl Future<Output = Result<usize>> {
        consume::count(self.enumerator())
    }

    /// Counts the elements for which `predicate` holds.
    ///
    /// # Errors
    ///
    /// Propagates any error from the enumerator chain.
    fn count_where<F>(&self, predicate: F) -> impl Future<Output = Result<usize>>
    where
        F: FnMut(&Self::Item) -> bool,
    {
        consume::count_where(self.enumerator(), predicate)
    }

    /// Returns whether the sequence has any element. Pulls at most one.
    ///
    /// # Errors
    ///
    /// Propagates any error from the enumerator chain.
    fn any(&self) -> impl Future<Output = Result<bool>> {
        consume::any_where(self.enumerator(), |_| true)
    }

    /// Returns whether any element satisfies `predicate`, stopping at the
    /// first that does.
    ///
    /// # Errors
    ///
    /// Propagates any error from the enumerator chain.
    fn any_where<F>(&self, predicate: F) -> impl Future<Output = Result<bool>>
    where
        F: FnMut(&Self::Item) -> bool,
    {
        consume::any_where(self.enumerator(), predicate)
    }

    /// Returns whether every element satisfies `predicate`, stopping at the
    /// first that does not. Vacuously `true` for an empty sequence.
    ///
    /// # Errors
    ///
    /// Propagates any error from the enumerator chain.
    fn all<F>(&self, predicate: F) -> impl Future<Output = Result<bool>>
    where
        F: FnMut(&Self::Item) -> bool,
    {
        consume::all(self.enumerator(), predicate)
    }

    /// Folds every element into an accumulator, in order.
    ///
    /// # Errors
    ///
    /// Propagates any error from the enumerator chain.
    fn fold<B, F>(&self, init: B, f: F) -> impl Future<Output = Result<B>>
    where
        F: FnMut(B, Self::Item) -> B,
    {
        consume::fold(self.enumerator(), init, f)
    }
}

impl<S> AsyncSequenceExt for S where S: AsyncSequence {}
