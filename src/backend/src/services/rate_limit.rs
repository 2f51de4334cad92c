//! Throttling of credential submissions.
//!
//! Two rules apply: a minimum gap between attempts and a cap on attempts
//! within a window that restarts once the portal has been quiet for a minute.

use std::time::{Duration, Instant};
use thiserror::Error;

pub const MIN_SAVE_INTERVAL: Duration = Duration::from_secs(2);
pub const RATE_LIMIT_WINDOW: Duration = Duration::from_secs(60);
pub const MAX_SAVE_ATTEMPTS: u32 = 5;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RateLimited {
    #[error("Too many requests. Please wait.")]
    TooSoon,
    #[error("Too many attempts. Please wait 60 seconds.")]
    TooManyAttempts,
}

#[derive(Debug, Default)]
pub struct SaveRateLimiter {
    last_attempt: Option<Instant>,
    attempts: u32,
}

impl SaveRateLimiter {
    /// Record an attempt at `now` if it is allowed.
    ///
    /// Rejected attempts are not recorded, so the window is measured from the
    /// last accepted one.
    pub fn check(&mut self, now: Instant) -> Result<(), RateLimited> {
        if let Some(last) = self.last_attempt {
            let elapsed = now.saturating_duration_since(last);

            if elapsed < MIN_SAVE_INTERVAL {
                return Err(RateLimited::TooSoon);
            }

            if elapsed > RATE_LIMIT_WINDOW {
                self.attempts = 0;
            }
        }

        if self.attempts >= MAX_SAVE_ATTEMPTS {
            return Err(RateLimited::TooManyAttempts);
        }

        self.last_attempt = Some(now);
        self.attempts += 1;
        Ok(())
    }
}
