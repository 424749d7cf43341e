use core::{marker::PhantomData, time::Duration};

use crate::{
    error::{Error, Result},
    futures::{Interrupt, SleepProvider},
    sequence::{AsyncEnumerator, AsyncSequence},
};

/// An enumerator decorator that bounds every `advance` by a timer.
///
/// Timeouts are not part of the protocol itself; this decorator composes one
/// from the outside by racing the inner `advance` against
/// [`SleepProvider::sleep_for`]. `try_get_next` never suspends and is passed
/// through untouched.
#[derive(Debug)]
pub struct Timeout<E, S> {
    inner: E,
    duration: Duration,
    _sleep: PhantomData<S>,
}

impl<E, S> Timeout<E, S>
where
    E: AsyncEnumerator,
    S: SleepProvider,
{
    /// Wraps `inner`; every `advance` must finish within `duration`.
    pub const fn new(inner: E, duration: Duration) -> Self {
        Self {
            inner,
            duration,
            _sleep: PhantomData,
        }
    }
}

impl<E, S> AsyncEnumerator for Timeout<E, S>
where
    E: AsyncEnumerator,
    S: SleepProvider,
{
    type Item = E::Item;

    fn try_get_next(&mut self) -> Option<Self::Item> {
        self.inner.try_get_next()
    }

    async fn advance(&mut self) -> Result<bool> {
        let result = Interrupt::new(
            self.inner.advance(),
            S::sleep_for(self.duration),
            Error::TimedOut(self.duration),
        )
        .await;
        #[cfg(feature = "tracing")]
        if let Err(Error::TimedOut(after)) = &result {
            tracing::debug!(?after, "advance timed out");
        }
        result
    }
}

/// A sequence whose every enumerator is wrapped in a [`Timeout`].
///
/// Created by [`AsyncSequenceExt::with_timeout`].
///
/// [`AsyncSequenceExt::with_timeout`]: crate::AsyncSequenceExt::with_timeout
#[derive(Debug)]
pub struct WithTimeout<Q, S> {
    source: Q,
    duration: Duration,
    _sleep: PhantomData<S>,
}

impl<Q, S> WithTimeout<Q, S> {
    pub(crate) const fn new(source: Q, duration: Duration) -> Self {
        Self {
            source,
            duration,
            _sleep: PhantomData,
        }
    }
}

impl<Q, S> AsyncSequence for WithTimeout<Q, S>
where
    Q: AsyncSequence,
    S: SleepProvider,
{
    type Item = Q::Item;
    type Enumerator = Timeout<Q::Enumerator, S>;

    fn enumerator(&self) -> Self::Enumerator {
        Timeout::new(self.source.enumerator(), self.duration)
    }
}
