use core::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

/// Yields control back to the executor once.
///
/// Runtime-agnostic: the task wakes itself and returns `Pending` on the first
/// poll, then completes on the second. Producers use it to model a real
/// suspension without depending on a particular runtime.
pub fn yield_now() -> YieldNow {
    YieldNow { yielded: false }
}

/// Future returned by [`yield_now`].
#[derive(Debug)]
#[must_use = "futures do nothing unless you `.await` or poll them"]
pub struct YieldNow {
    yielded: bool,
}

impl Future for YieldNow {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        if self.yielded {
            return Poll::Ready(());
        }
        self.yielded = true;
        cx.waker().wake_by_ref();
        Poll::Pending
    }
}
