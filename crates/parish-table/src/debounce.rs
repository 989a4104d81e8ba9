//! Cancellable debounce timer.

use std::time::Duration;

use tokio::time::{Instant, sleep_until};

/// Delay between the last keystroke and the search being applied.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(800);

/// Holds the latest value until it has been left alone for `delay`.
///
/// Every [`push`](Debouncer::push) restarts the timer, so a burst of
/// values yields only the last one, once.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Replace the pending value and restart the timer.
    pub fn push(&mut self, value: T) {
        self.pending = Some((value, Instant::now() + self.delay));
    }

    /// Drop the pending value without firing.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending(&self) -> Option<&T> {
        self.pending.as_ref().map(|(value, _)| value)
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, deadline)| *deadline)
    }

    /// Take the value if its deadline has passed.
    pub fn poll(&mut self) -> Option<T> {
        match &self.pending {
            Some((_, deadline)) if *deadline <= Instant::now() => {
                self.pending.take().map(|(value, _)| value)
            }
            _ => None,
        }
    }

    /// Wait for the deadline and take the value. Returns `None` at once if
    /// nothing is pending.
    pub async fn settled(&mut self) -> Option<T> {
        let deadline = self.deadline()?;
        sleep_until(deadline).await;
        self.pending.take().map(|(value, _)| value)
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(SEARCH_DEBOUNCE)
    }
}
