use core::{future::Future, time::Duration};

use tokio_util::sync::CancellationToken;

use crate::futures::{CancelSignal, SleepProvider};

/// [`SleepProvider`] backed by [`tokio::time::sleep`].
///
/// Needs a runtime with the time driver enabled.
pub struct TokioSleep;
impl SleepProvider for TokioSleep {
    async fn sleep_for(dur: Duration) {
        tokio::time::sleep(dur).await;
    }
}

/// [`SleepProvider`] that expires after one [`tokio::task::yield_now`],
/// ignoring the requested duration.
///
/// Bounds an `advance` to work that is already ready without arming a timer.
pub struct TokioYield;
impl SleepProvider for TokioYield {
    async fn sleep_for(_dur: Duration) {
        tokio::task::yield_now().await;
    }
}

impl CancelSignal for CancellationToken {
    fn is_cancelled(&self) -> bool {
        CancellationToken::is_cancelled(self)
    }

    fn cancelled(&self) -> impl Future<Output = ()> {
        CancellationToken::cancelled(self)
    }
}
