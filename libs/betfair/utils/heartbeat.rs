//! Session keep-alive scheduling

use chrono::{DateTime, Utc};
use std::time::Duration;

/// Tracks when the exchange session next needs a keep-alive
///
/// Sessions expire after a period without activity, so a loop that only
/// reads prices must still ping the keep-alive endpoint.
pub struct SessionHeartbeat {
    interval: Duration,
    last_refresh: DateTime<Utc>,
}

impl SessionHeartbeat {
    /// Start tracking a session refreshed just now
    pub fn new(interval_secs: u64) -> Self {
        Self {
            interval: Duration::from_secs(interval_secs),
            last_refresh: Utc::now(),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn last_refresh(&self) -> DateTime<Utc> {
        self.last_refresh
    }

    /// Time left before a keep-alive is due (zero when overdue)
    pub fn remaining(&self) -> Duration {
        let elapsed = Utc::now()
            .signed_duration_since(self.last_refresh)
            .to_std()
            .unwrap_or_default();
        self.interval.saturating_sub(elapsed)
    }

    pub fn is_due(&self) -> bool {
        self.remaining().is_zero()
    }

    /// Record a successful login or keep-alive
    pub fn refreshed(&mut self) {
        self.last_refresh = Utc::now();
    }
}
