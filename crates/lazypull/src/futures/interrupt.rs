use core::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use pin_project_lite::pin_project;

use crate::error::{Error, Result};

pin_project! {
    /// A future that races an `advance` against an interrupt.
    ///
    /// The interrupt is polled first, so an interrupt that is already ready
    /// wins over an `advance` that is also ready. When the interrupt wins the
    /// future resolves to the stored error and the `advance` future is left
    /// unpolled; it is dropped together with this future.
    #[must_use = "futures do nothing unless you `.await` or poll them"]
    pub struct Interrupt<F, I> {
        #[pin]
        advance: F,
        #[pin]
        interrupt: I,
        error: Option<Error>,
    }
}

impl<F, I> Interrupt<F, I>
where
    F: Future<Output = Result<bool>>,
    I: Future<Output = ()>,
{
    /// Constructs a new [`Interrupt`] that fails with `error` if `interrupt`
    /// completes first.
    pub fn new(advance: F, interrupt: I, error: Error) -> Self {
        Self {
            advance,
            interrupt,
            error: Some(error),
        }
    }
}

impl<F, I> Future for Interrupt<F, I>
where
    F: Future<Output = Result<bool>>,
    I: Future<Output = ()>,
{
    type Output = Result<bool>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();
        if let Some(error) = this.error.take() {
            if this.interrupt.poll(cx).is_ready() {
                return Poll::Ready(Err(error));
            }
            *this.error = Some(error);
        }
        this.advance.poll(cx)
    }
}
