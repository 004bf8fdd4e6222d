//! Edit-time-window countdown arithmetic.
//!
//! The merchant's `edit_time_window` gives customers a fixed number of
//! minutes after placement to change their order. This module computes how
//! much of that window remains; the client crate drives it from a 1-second
//! timer to render a live countdown.

use chrono::{DateTime, Utc};

/// Remaining seconds below which the countdown switches to a warning.
pub const CLOSING_THRESHOLD_SECS: i64 = 1800;

/// The edit window of a placed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditWindow {
    /// When the order was placed.
    pub placed_at: DateTime<Utc>,
    /// Window length in minutes.
    pub window_minutes: u32,
}

/// Where the countdown currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowState {
    /// Plenty of time left.
    Open {
        /// Seconds until the window closes.
        remaining_secs: i64,
    },
    /// Under [`CLOSING_THRESHOLD_SECS`] left; the UI shows a warning.
    Closing {
        /// Seconds until the window closes.
        remaining_secs: i64,
    },
    /// The window has closed; editing is no longer possible.
    Expired,
}

impl EditWindow {
    /// Create a window for an order placed at `placed_at`.
    #[must_use]
    pub const fn new(placed_at: DateTime<Utc>, window_minutes: u32) -> Self {
        Self {
            placed_at,
            window_minutes,
        }
    }

    /// Seconds until the window closes. Negative once expired.
    #[must_use]
    pub fn remaining_secs(&self, now: DateTime<Utc>) -> i64 {
        i64::from(self.window_minutes) * 60 - (now - self.placed_at).num_seconds()
    }

    /// The countdown state at `now`.
    #[must_use]
    pub fn state(&self, now: DateTime<Utc>) -> WindowState {
        let remaining = self.remaining_secs(now);
        if remaining <= 0 {
            WindowState::Expired
        } else if remaining < CLOSING_THRESHOLD_SECS {
            WindowState::Closing {
                remaining_secs: remaining,
            }
        } else {
            WindowState::Open {
                remaining_secs: remaining,
            }
        }
    }
}

impl WindowState {
    /// Whether the window has closed.
    #[must_use]
    pub const fn is_expired(&self) -> bool {
        matches!(self, Self::Expired)
    }

    /// Remaining seconds, zero once expired.
    #[must_use]
    pub const fn remaining_secs(&self) -> i64 {
        match self {
            Self::Open { remaining_secs } | Self::Closing { remaining_secs } => *remaining_secs,
            Self::Expired => 0,
        }
    }
}

/// Format remaining seconds as `M:SS` or `H:MM:SS` for display.
#[must_use]
pub fn format_remaining(remaining_secs: i64) -> String {
    let secs = remaining_secs.max(0);
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;
    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes}:{seconds:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_open_well_before_threshold() {
        let now = Utc::now();
        let window = EditWindow::new(now, 120);
        assert_eq!(
            window.state(now),
            WindowState::Open {
                remaining_secs: 7200
            }
        );
    }

    #[test]
    fn test_closing_under_threshold() {
        let now = Utc::now();
        // 60-minute window, 35 minutes gone: 25 minutes (< 30) remain.
        let window = EditWindow::new(now - Duration::minutes(35), 60);
        let state = window.state(now);
        assert_eq!(
            state,
            WindowState::Closing {
                remaining_secs: 1500
            }
        );
        assert!(!state.is_expired());
    }

    #[test]
    fn test_expired_at_and_after_the_boundary() {
        let now = Utc::now();
        let window = EditWindow::new(now - Duration::minutes(60), 60);
        assert_eq!(window.state(now), WindowState::Expired);

        let window = EditWindow::new(now - Duration::minutes(90), 60);
        assert!(window.state(now).is_expired());
        assert_eq!(window.state(now).remaining_secs(), 0);
    }

    #[test]
    fn test_remaining_secs_goes_negative() {
        let now = Utc::now();
        let window = EditWindow::new(now - Duration::minutes(61), 60);
        assert_eq!(window.remaining_secs(now), -60);
    }

    #[test]
    fn test_format_remaining() {
        assert_eq!(format_remaining(7200), "2:00:00");
        assert_eq!(format_remaining(1500), "25:00");
        assert_eq!(format_remaining(65), "1:05");
        assert_eq!(format_remaining(-10), "0:00");
    }
}
