use tokio::sync::mpsc;
use tracing::debug;

/// External refresh trigger consumed by the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshTrigger {
    /// System wake or session unlock; refreshes only when the interval
    /// has elapsed.
    Wake,
    /// User-initiated; always refreshes and re-resolves the script.
    Manual,
}

/// Cloneable sender half handed to the UI collaborator.
///
/// The channel holds a single pending trigger: offers made while a
/// refresh is running and one is already queued are dropped, so bursts
/// of wake events cannot stack overlapping invocations.
#[derive(Debug, Clone)]
pub struct RefreshHandle {
    tx: mpsc::Sender<RefreshTrigger>,
}

impl RefreshHandle {
    pub(super) fn new(tx: mpsc::Sender<RefreshTrigger>) -> Self {
        Self { tx }
    }

    pub fn wake(&self) {
        self.offer(RefreshTrigger::Wake);
    }

    pub fn manual_refresh(&self) {
        self.offer(RefreshTrigger::Manual);
    }

    fn offer(&self, trigger: RefreshTrigger) {
        if self.tx.try_send(trigger).is_err() {
            debug!(trigger = ?trigger, "Refresh already pending; dropping trigger");
        }
    }
}
