//! Rate limit details attached to rate-limited review fetches.

use std::fmt;

use chrono::{DateTime, Utc};

/// Core API quota as reported by GitHub's `/rate_limit` endpoint.
///
/// # Example
///
/// ```
/// use approval_gate::github::rate_limit::RateLimitInfo;
///
/// let info = RateLimitInfo::new(60, 0, 1_700_000_000);
/// assert!(info.is_exhausted());
/// assert_eq!(info.limit(), 60);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitInfo {
    limit: u32,
    remaining: u32,
    reset_at: u64,
}

impl RateLimitInfo {
    /// Creates a new rate limit snapshot.
    #[must_use]
    pub const fn new(limit: u32, remaining: u32, reset_at: u64) -> Self {
        Self {
            limit,
            remaining,
            reset_at,
        }
    }

    /// Maximum requests allowed in the current window.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Requests left in the current window.
    #[must_use]
    pub const fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Unix timestamp at which the window resets.
    #[must_use]
    pub const fn reset_at(&self) -> u64 {
        self.reset_at
    }

    /// Whether the quota is used up.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }

    /// Reset time as a UTC timestamp, if representable.
    #[must_use]
    pub fn reset_time(&self) -> Option<DateTime<Utc>> {
        let seconds = i64::try_from(self.reset_at).ok()?;
        DateTime::from_timestamp(seconds, 0)
    }

    /// Seconds left before the quota refills; zero once the reset has passed.
    #[must_use]
    pub fn seconds_until_reset(&self) -> u64 {
        let now = u64::try_from(Utc::now().timestamp()).unwrap_or(0);
        self.reset_at.saturating_sub(now)
    }
}

impl fmt::Display for RateLimitInfo {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}/{} requests left", self.remaining, self.limit)?;
        match self.reset_time() {
            Some(reset) => write!(formatter, ", resets at {}", reset.to_rfc3339()),
            None => write!(formatter, ", resets at {}", self.reset_at),
        }
    }
}
