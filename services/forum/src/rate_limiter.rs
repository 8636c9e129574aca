//! Sign-in rate limiter for preventing brute force attacks
//!
//! Failed attempts are counted per username inside a sliding window; a
//! successful sign-in clears the slate. The state is in-process only, so
//! the limit applies per service instance.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::info;

/// Rate limiter configuration
#[derive(Debug, Clone)]
pub struct RateLimiterConfig {
    /// Maximum number of failed attempts allowed inside the window
    pub max_attempts: u32,
    /// Time window in seconds
    pub window_seconds: u64,
    /// Ban duration in seconds
    pub ban_duration_seconds: u64,
}

impl Default for RateLimiterConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            window_seconds: 300,        // 5 minutes
            ban_duration_seconds: 3600, // 1 hour
        }
    }
}

#[derive(Debug)]
struct AttemptRecord {
    failures: u32,
    window_started: Instant,
    ban_expires: Option<Instant>,
}

/// Per-username sign-in attempt limiter
#[derive(Debug, Clone)]
pub struct SigninRateLimiter {
    config: RateLimiterConfig,
    records: Arc<Mutex<HashMap<String, AttemptRecord>>>,
}

impl SigninRateLimiter {
    /// Create a new rate limiter
    pub fn new(config: RateLimiterConfig) -> Self {
        Self {
            config,
            records: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Whether a sign-in attempt for this username may proceed.
    pub async fn is_allowed(&self, username: &str) -> bool {
        let mut records = self.records.lock().await;
        let now = Instant::now();

        let Some(record) = records.get_mut(username) else {
            return true;
        };

        if let Some(ban_expires) = record.ban_expires {
            if now >= ban_expires {
                record.failures = 0;
                record.ban_expires = None;
            } else {
                return false;
            }
        }

        if now.duration_since(record.window_started)
            >= Duration::from_secs(self.config.window_seconds)
        {
            record.failures = 0;
            record.window_started = now;
        }

        true
    }

    /// Count a failed attempt; trips the ban once the window limit is hit.
    pub async fn record_failure(&self, username: &str) {
        let mut records = self.records.lock().await;
        let now = Instant::now();

        let record = records.entry(username.to_string()).or_insert(AttemptRecord {
            failures: 0,
            window_started: now,
            ban_expires: None,
        });

        record.failures += 1;
        if record.failures >= self.config.max_attempts {
            record.ban_expires = Some(now + Duration::from_secs(self.config.ban_duration_seconds));
            info!(
                "Banned sign-in for {} for {} seconds",
                username, self.config.ban_duration_seconds
            );
        }
    }

    /// Clear the record after a successful sign-in.
    pub async fn record_success(&self, username: &str) {
        let mut records = self.records.lock().await;
        records.remove(username);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limiter(max_attempts: u32) -> SigninRateLimiter {
        SigninRateLimiter::new(RateLimiterConfig {
            max_attempts,
            window_seconds: 300,
            ban_duration_seconds: 3600,
        })
    }

    #[tokio::test]
    async fn allows_until_the_failure_limit() {
        let limiter = limiter(3);

        for _ in 0..2 {
            assert!(limiter.is_allowed("alice").await);
            limiter.record_failure("alice").await;
        }
        assert!(limiter.is_allowed("alice").await);

        limiter.record_failure("alice").await;
        assert!(!limiter.is_allowed("alice").await);
    }

    #[tokio::test]
    async fn success_clears_the_record() {
        let limiter = limiter(3);

        limiter.record_failure("alice").await;
        limiter.record_failure("alice").await;
        limiter.record_success("alice").await;

        for _ in 0..2 {
            assert!(limiter.is_allowed("alice").await);
            limiter.record_failure("alice").await;
        }
        assert!(limiter.is_allowed("alice").await);
    }

    #[tokio::test]
    async fn usernames_are_limited_independently() {
        let limiter = limiter(1);

        limiter.record_failure("alice").await;
        assert!(!limiter.is_allowed("alice").await);
        assert!(limiter.is_allowed("bob").await);
    }
}
