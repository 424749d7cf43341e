use core::time::Duration;

use smol::Timer;

use crate::futures::SleepProvider;

/// [`SleepProvider`] backed by a `smol` [`Timer`].
pub struct SmolSleep;
impl SleepProvider for SmolSleep {
    async fn sleep_for(dur: Duration) {
        Timer::after(dur).await;
    }
}

/// [`SleepProvider`] that expires after one trip through the `smol` executor,
/// ignoring the requested duration.
pub struct SmolYield;
impl SleepProvider for SmolYield {
    async fn sleep_for(_dur: Duration) {
        smol::future::yield_now().await;
    }
}
