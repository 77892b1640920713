use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::Notify;

/// A set-once completion flag that can be awaited.
///
/// Goes from not done to done at most once and never back.
#[derive(Debug, Default)]
pub struct Completion {
    done: AtomicBool,
    notify: Notify,
}

impl Completion {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the flag as done. Returns `true` only for the call that flipped it.
    pub fn mark(&self) -> bool {
        let first = !self.done.swap(true, Ordering::SeqCst);
        if first {
            self.notify.notify_waiters();
        }
        first
    }

    pub fn is_done(&self) -> bool {
        self.done.load(Ordering::SeqCst)
    }

    /// Resolves once [`mark`](Self::mark) has been called.
    pub async fn wait(&self) {
        loop {
            // Register before checking so a concurrent `mark` cannot slip between.
            let notified = self.notify.notified();
            if self.is_done() {
                return;
            }
            notified.await;
        }
    }
}
