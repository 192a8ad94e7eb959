use std::sync::Mutex;
use std::time::Duration;
use tokio::time::{sleep_until, Instant};
use tracing::debug;

use crate::config::DEFAULT_REQUESTS_PER_MINUTE;

/// Fixed spacing between outbound completion calls.
///
/// The limiter keeps a single "earliest next call" cursor. `throttle` moves it
/// one interval past the current time and waits for it; `ready` only waits.
/// There is no burst allowance.
#[derive(Debug)]
pub struct RateLimiter {
    interval: Duration,
    next_call: Mutex<Instant>,
}

impl RateLimiter {
    pub fn new(requests_per_minute: u32) -> Self {
        let rpm = if requests_per_minute == 0 {
            DEFAULT_REQUESTS_PER_MINUTE
        } else {
            requests_per_minute
        };

        Self {
            interval: Duration::from_millis(60_000 / rpm as u64),
            next_call: Mutex::new(Instant::now()),
        }
    }

    /// Minimum spacing between two calls
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Wait until the cursor allows another call
    pub async fn ready(&self) {
        let deadline = self.cursor();
        if deadline > Instant::now() {
            debug!("Rate limiter: waiting {:?}", deadline.saturating_duration_since(Instant::now()));
            sleep_until(deadline).await;
        }
    }

    /// Called after each completed call: advance the cursor and wait for it
    pub async fn throttle(&self) {
        let deadline = Instant::now() + self.interval;
        {
            let mut next_call = self
                .next_call
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            if deadline > *next_call {
                *next_call = deadline;
            }
        }
        sleep_until(deadline).await;
    }

    fn cursor(&self) -> Instant {
        *self
            .next_call
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_REQUESTS_PER_MINUTE)
    }
}
