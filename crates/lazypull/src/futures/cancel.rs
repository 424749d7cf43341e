use core::future::Future;
use std::sync::Arc;

use crate::{
    error::{Error, Result},
    futures::Interrupt,
    sequence::{AsyncEnumerator, AsyncSequence},
};

/// A read-only cancellation signal.
///
/// `lazypull` only ever observes a signal; whoever owns it decides when to
/// set it. With the `tokio` feature, [`tokio_util::sync::CancellationToken`]
/// implements this trait.
///
/// [`tokio_util::sync::CancellationToken`]: https://docs.rs/tokio-util/latest/tokio_util/sync/struct.CancellationToken.html
pub trait CancelSignal {
    /// Returns `true` once cancellation has been requested.
    fn is_cancelled(&self) -> bool;

    /// Returns a future that completes once cancellation has been requested.
    fn cancelled(&self) -> impl Future<Output = ()>;
}

impl<C> CancelSignal for &C
where
    C: CancelSignal,
{
    fn is_cancelled(&self) -> bool {
        (**self).is_cancelled()
    }

    fn cancelled(&self) -> impl Future<Output = ()> {
        (**self).cancelled()
    }
}

impl<C> CancelSignal for Arc<C>
where
    C: CancelSignal,
{
    fn is_cancelled(&self) -> bool {
        (**self).is_cancelled()
    }

    fn cancelled(&self) -> impl Future<Output = ()> {
        (**self).cancelled()
    }
}

/// An enumerator decorator that observes a [`CancelSignal`].
///
/// - `advance` fails with [`Error::Cancelled`] without delegating when the
///   signal is already set. Otherwise it races the inner `advance` against
///   the signal, and the caller's future completes with
///   [`Error::Cancelled`] if the signal fires first.
/// - `try_get_next` hands out nothing once the signal is set, so the
///   consumer's next step is an `advance`, which reports the cancellation.
///
/// Cancellation is advisory and stops at the consumer boundary. The inner
/// operation is not aborted. Whatever it had in flight stays stored in the
/// inner enumerator: [`Cancellable::into_inner`] hands back an enumerator
/// whose next `advance` resumes that work, and work already handed off to
/// other tasks continues to completion unobserved.
#[derive(Debug)]
pub struct Cancellable<E, C> {
    inner: E,
    signal: C,
}

impl<E, C> Cancellable<E, C>
where
    E: AsyncEnumerator,
    C: CancelSignal,
{
    /// Wraps `inner` so that every protocol call observes `signal`.
    pub const fn new(inner: E, signal: C) -> Self {
        Self { inner, signal }
    }

    /// Returns the wrapped enumerator.
    pub fn into_inner(self) -> E {
        self.inner
    }
}

impl<E, C> AsyncEnumerator for Cancellable<E, C>
where
    E: AsyncEnumerator,
    C: CancelSignal,
{
    type Item = E::Item;

    fn try_get_next(&mut self) -> Option<Self::Item> {
        if self.signal.is_cancelled() {
            return None;
        }
        self.inner.try_get_next()
    }

    async fn advance(&mut self) -> Result<bool> {
        if self.signal.is_cancelled() {
            #[cfg(feature = "tracing")]
            tracing::debug!("advance refused, signal already set");
            return Err(Error::Cancelled);
        }
        Interrupt::new(
            self.inner.advance(),
            self.signal.cancelled(),
            Error::Cancelled,
        )
        .await
    }
}

/// A sequence whose every enumerator is [`Cancellable`].
///
/// Created by [`AsyncSequenceExt::with_cancellation`].
///
/// [`AsyncSequenceExt::with_cancellation`]: crate::AsyncSequenceExt::with_cancellation
#[derive(Debug, Clone)]
pub struct WithCancellation<S, C> {
    source: S,
    signal: C,
}

impl<S, C> WithCancellation<S, C> {
    pub(crate) const fn new(source: S, signal: C) -> Self {
        Self { source, signal }
    }
}

impl<S, C> AsyncSequence for WithCancellation<S, C>
where
    S: AsyncSequence,
    C: CancelSignal + Clone,
{
    type Item = S::Item;
    type Enumerator = Cancellable<S::Enumerator, C>;

    fn enumerator(&self) -> Self::Enumerator {
        Cancellable::new(self.source.enumerator(), self.signal.clone())
    }
}

#[cfg(all(test, feature = "tokio"))]
mod tests {
    use core::time::Duration;

    use tokio_util::sync::CancellationToken;

    use super::*;
    use crate::{AsyncSequenceExt, batched, iter};

    #[tokio::test]
    async fn preset_signal_fails_before_delegating() {
        let token = CancellationToken::new();
        token.cancel();

        let mut e = Cancellable::new(iter(1..=3).enumerator(), token.clone());
        assert_eq!(e.try_get_next(), None);
        assert!(matches!(e.advance().await, Err(Error::Cancelled)));

        // The inner enumerator was never touched.
        let mut inner = e.into_inner();
        assert!(inner.advance().await.unwrap());
        assert_eq!(inner.try_get_next(), Some(1));
    }

    #[tokio::test]
    async fn unset_signal_is_transparent() {
        let token = CancellationToken::new();
        let seq = batched(1..=9, 2).with_cancellation(token);
        assert_eq!(seq.to_list().await.unwrap(), (1..=9).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn signal_set_during_suspension_cancels_the_caller() {
        let token = CancellationToken::new();
        let seq = iter([1, 2])
            .then(|v| async move {
                tokio::time::sleep(Duration::from_secs(60)).await;
                v
            })
            .with_cancellation(token.clone());

        let canceller = token.clone();
        let (result, ()) = tokio::join!(seq.to_list(), async move {
            tokio::time::sleep(Duration::from_millis(5)).await;
            canceller.cancel();
        });
        assert!(matches!(result, Err(Error::Cancelled)));
    }

    #[tokio::test]
    async fn nothing_is_surfaced_after_cancellation() {
        let token = CancellationToken::new();
        let seq = batched(1..=100, 10).with_cancellation(&token);
        let mut e = seq.enumerator();

        assert!(e.advance().await.unwrap());
        assert_eq!(e.try_get_next(), Some(1));
        token.cancel();
        assert_eq!(e.try_get_next(), None);
        assert!(matches!(e.advance().await, Err(Error::Cancelled)));
    }

    #[tokio::test]
    async fn terminal_consumers_report_cancellation() {
        let token = CancellationToken::new();
        token.cancel();
        let seq = iter(0..3).with_cancellation(Arc::new(token));
        assert!(matches!(seq.count().await, Err(Error::Cancelled)));
        assert!(matches!(seq.first().await, Err(Error::Cancelled)));
    }

    #[tokio::test(start_paused = true)]
    async fn inner_work_survives_cancellation() {
        let token = CancellationToken::new();
        let seq = iter([1, 2, 3]).then(|v| async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            v
        });
        let mut e = Cancellable::new(seq.enumerator(), token.clone());
        assert_eq!(e.next().await.unwrap(), Some(1));

        let canceller = token.clone();
        let (result, ()) = tokio::join!(e.next(), async move {
            tokio::time::sleep(Duration::from_millis(5)).await;
            canceller.cancel();
        });
        assert!(matches!(result, Err(Error::Cancelled)));

        // The selector for 2 was interrupted, not lost.
        let mut inner = e.into_inner();
        let mut rest = Vec::new();
        while let Some(v) = inner.next().await.unwrap() {
            rest.push(v);
        }
        assert_eq!(rest, vec![2, 3]);
    }
}
