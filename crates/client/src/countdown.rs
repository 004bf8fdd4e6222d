//! Live edit-window countdown.
//!
//! Publishes the window state over a watch channel, recomputed by a
//! 1-second timer. The task stops on its own once the window expires and is
//! aborted when the owning [`Countdown`] is dropped, so no timer outlives
//! its consumer.

use chrono::Utc;
use orderly_core::{EditWindow, WindowState};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Duration, MissedTickBehavior, interval};

/// Handle to a running countdown.
#[derive(Debug)]
pub struct Countdown {
    state_rx: watch::Receiver<WindowState>,
    handle: JoinHandle<()>,
}

impl Countdown {
    /// Start ticking for the given window.
    ///
    /// The channel starts with the current state, so subscribers never see a
    /// stale "open" for an already-expired window.
    #[must_use]
    pub fn spawn(window: EditWindow) -> Self {
        let (state_tx, state_rx) = watch::channel(window.state(Utc::now()));

        let handle = tokio::spawn(async move {
            let mut ticker = interval(Duration::from_secs(1));
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                let state = window.state(Utc::now());
                let expired = state.is_expired();
                if state_tx.send(state).is_err() {
                    // All receivers gone.
                    break;
                }
                if expired {
                    break;
                }
            }
        });

        Self { state_rx, handle }
    }

    /// The most recently published state.
    #[must_use]
    pub fn state(&self) -> WindowState {
        *self.state_rx.borrow()
    }

    /// A receiver for observing state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<WindowState> {
        self.state_rx.clone()
    }

    /// Whether the background task has stopped (expired or aborted).
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for Countdown {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration as ChronoDuration;

    #[tokio::test]
    async fn test_expired_window_starts_expired() {
        let window = EditWindow::new(Utc::now() - ChronoDuration::minutes(61), 60);
        let countdown = Countdown::spawn(window);

        assert!(countdown.state().is_expired());
    }

    #[tokio::test]
    async fn test_task_stops_after_expiry() {
        let window = EditWindow::new(Utc::now() - ChronoDuration::minutes(61), 60);
        let countdown = Countdown::spawn(window);

        // First tick fires immediately, publishes Expired and exits.
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(countdown.is_finished());
    }

    #[tokio::test]
    async fn test_open_window_reports_remaining_time() {
        let window = EditWindow::new(Utc::now(), 120);
        let countdown = Countdown::spawn(window);

        let state = countdown.state();
        assert!(!state.is_expired());
        assert!(state.remaining_secs() > 7000);
    }

    #[tokio::test]
    async fn test_drop_aborts_the_task() {
        let window = EditWindow::new(Utc::now(), 120);
        let countdown = Countdown::spawn(window);
        let mut rx = countdown.subscribe();
        drop(countdown);

        // The sender side is owned by the aborted task; the channel closes
        // once the abort lands, after at most one already-queued update.
        let closed = tokio::time::timeout(Duration::from_secs(2), async {
            while rx.changed().await.is_ok() {}
        })
        .await;
        assert!(closed.is_ok());
    }
}
