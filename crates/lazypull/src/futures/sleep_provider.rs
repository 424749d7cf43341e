use core::{future::Future, time::Duration};

/// A trait that abstracts over how to sleep for a given [`Duration`] in async
/// contexts.
///
/// This keeps [`WithTimeout`] generic over runtimes like `Tokio` or `Smol`.
///
/// [`WithTimeout`]: crate::WithTimeout
pub trait SleepProvider {
    fn sleep_for(dur: Duration) -> impl Future<Output = ()>;
}
