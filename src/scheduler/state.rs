use std::time::{Duration, Instant};

/// Mutable refresh bookkeeping owned by the scheduler.
///
/// The last-refresh instant moves only on successful completion, so
/// wake-triggered checks measure elapsed time against real refreshes
/// rather than attempts.
#[derive(Debug, Default)]
pub struct RefreshState {
    last_refresh: Option<Instant>,
    consecutive_failures: u32,
}

impl RefreshState {
    pub fn mark_success(&mut self) {
        self.last_refresh = Some(Instant::now());
        self.consecutive_failures = 0;
    }

    pub fn mark_failure(&mut self) -> u32 {
        self.consecutive_failures = self.consecutive_failures.saturating_add(1);
        self.consecutive_failures
    }

    /// Whether a wake event should refresh: true when nothing has been
    /// refreshed yet or the interval has fully elapsed (the boundary
    /// counts as elapsed).
    pub fn wake_due(&self, interval: Duration) -> bool {
        match self.last_refresh {
            Some(last) => last.elapsed() >= interval,
            None => true,
        }
    }

    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures
    }
}
