//! Counter of forwarded requests that shutdown waits on.

use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Notify;

#[derive(Debug, Default)]
pub(super) struct InFlight {
    active: AtomicUsize,
    idle: Notify,
}

impl InFlight {
    /// Counts one request until the returned guard drops, including on
    /// unwind.
    pub(super) fn enter(&self) -> InFlightGuard<'_> {
        self.active.fetch_add(1, Ordering::SeqCst);
        InFlightGuard { counter: self }
    }

    pub(super) fn current(&self) -> usize {
        self.active.load(Ordering::SeqCst)
    }

    /// Resolves once no request is in flight.
    pub(super) async fn wait_idle(&self) {
        loop {
            let notified = self.idle.notified();
            if self.current() == 0 {
                return;
            }
            notified.await;
        }
    }
}

pub(super) struct InFlightGuard<'a> {
    counter: &'a InFlight,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        if self.counter.active.fetch_sub(1, Ordering::SeqCst) == 1 {
            self.counter.idle.notify_waiters();
        }
    }
}
