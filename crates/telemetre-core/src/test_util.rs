//! Shared helpers for unit tests.

use core::future::Future;
use core::pin::pin;
use core::task::{Context, Poll, Waker};

/// Drive a future to completion on the test thread.
///
/// The futures under test never yield to a real reactor (bus doubles answer
/// immediately), so a no-op waker poll loop is all that is needed.
pub fn block_on<F: Future>(fut: F) -> F::Output {
    let mut fut = pin!(fut);
    let mut cx = Context::from_waker(Waker::noop());
    loop {
        if let Poll::Ready(out) = fut.as_mut().poll(&mut cx) {
            return out;
        }
    }
}
