use core::{
    future::{Future, poll_fn},
    mem,
    pin::Pin,
};
use std::sync::Arc;

use crate::{
    error::Result,
    sequence::{AsyncEnumerator, AsyncSequence},
};

/// Sequence returned by [`AsyncSequenceExt::then`].
///
/// [`AsyncSequenceExt::then`]: crate::AsyncSequenceExt::then
pub struct Then<S, F> {
    source: S,
    f: Arc<F>,
}

impl<S, F> Then<S, F> {
    pub(crate) fn new(source: S, f: F) -> Self {
        Self {
            source,
            f: Arc::new(f),
        }
    }
}

impl<S, F> Clone for Then<S, F>
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

impl<S, Fut, F> AsyncSequence for Then<S, F>
where
    S: AsyncSequence,
    F: Fn(S::Item) -> Fut,
    Fut: Future,
{
    type Item = Fut::Output;
    type Enumerator = ThenEnumerator<S::Enumerator, F, Fut>;

    fn enumerator(&self) -> Self::Enumerator {
        ThenEnumerator {
            staged: Staged::Idle,
            source: self.source.enumerator(),
            f: Arc::clone(&self.f),
        }
    }
}

/// Per-enumerator state of [`ThenEnumerator`].
enum Staged<Fut: Future> {
    /// Nothing staged; the next element comes from the source.
    Idle,
    /// A selector future waiting for `advance` to resolve it. It stays here
    /// until it completes, so an interrupted `advance` resumes it.
    Pending(Pin<Box<Fut>>),
    /// A resolved result waiting to be handed out once.
    Ready(Fut::Output),
}

/// Enumerator for [`Then`].
///
/// `try_get_next` stages the selector future for the next source element and
/// reports nothing; the following `advance` resolves it; the `try_get_next`
/// after that hands the result out. Every output element therefore costs one
/// suspension, and no more.
///
/// The selector future lives in the enumerator, not in the `advance` future.
/// Dropping an `advance` before the selector completes loses nothing; the
/// next `advance` picks the same selector up where it stopped.
pub struct ThenEnumerator<E, F, Fut>
where
    Fut: Future,
{
    staged: Staged<Fut>,
    source: E,
    f: Arc<F>,
}

impl<E, F, Fut> AsyncEnumerator for ThenEnumerator<E, F, Fut>
where
    E: AsyncEnumerator,
    F: Fn(E::Item) -> Fut,
    Fut: Future,
{
    type Item = Fut::Output;

    fn try_get_next(&mut self) -> Option<Self::Item> {
        match mem::replace(&mut self.staged, Staged::Idle) {
            Staged::Ready(value) => Some(value),
            pending @ Staged::Pending(_) => {
                self.staged = pending;
                None
            }
            Staged::Idle => {
                if let Some(value) = self.source.try_get_next() {
                    self.staged = Staged::Pending(Box::pin((self.f)(value)));
                }
                None
            }
        }
    }

    async fn advance(&mut self) -> Result<bool> {
        match &mut self.staged {
            Staged::Pending(fut) => {
                let value = poll_fn(|cx| fut.as_mut().poll(cx)).await;
                self.staged = Staged::Ready(value);
                Ok(true)
            }
            Staged::Ready(_) => Ok(true),
            Staged::Idle => self.source.advance().await,
        }
    }
}
