use chrono::{DateTime, Utc};
use reqwest::header::{HeaderMap, RETRY_AFTER};
use std::time::Duration;

pub const DEFAULT_MAX_RETRIES: u32 = 4;
pub const DEFAULT_MAX_RETRY_INTERVAL: Duration = Duration::from_secs(30);
pub const MIN_RETRY_INTERVAL: Duration = Duration::from_secs(1);

/// Automatic retry settings for transient failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub max_interval: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            max_interval: DEFAULT_MAX_RETRY_INTERVAL,
        }
    }
}

impl RetryPolicy {
    /// Zero values fall back to the defaults.
    pub fn new(max_retries: u32, max_interval: Duration) -> Self {
        Self {
            max_retries: if max_retries == 0 {
                DEFAULT_MAX_RETRIES
            } else {
                max_retries
            },
            max_interval: if max_interval.is_zero() {
                DEFAULT_MAX_RETRY_INTERVAL
            } else {
                max_interval
            },
        }
    }

    /// 429 and 5xx are transient, except 501 which never will be implemented.
    pub fn should_retry_status(status: u16) -> bool {
        status == 429 || ((500..=599).contains(&status) && status != 501)
    }

    /// Delay before retry number `attempt` (zero-based).
    pub fn backoff(&self, attempt: u32, retry_after: Option<Duration>) -> Duration {
        let computed = retry_after.unwrap_or_else(|| {
            let factor = 2u32.checked_pow(attempt).unwrap_or(u32::MAX);
            MIN_RETRY_INTERVAL.saturating_mul(factor)
        });
        computed.min(self.max_interval)
    }
}

/// Parse `Retry-After` as either delta-seconds or an HTTP date.
pub fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
    let raw = headers.get(RETRY_AFTER)?.to_str().ok()?.trim();

    if let Ok(secs) = raw.parse::<u64>() {
        return Some(Duration::from_secs(secs));
    }

    let when = DateTime::parse_from_rfc2822(raw).ok()?.with_timezone(&Utc);
    let delta = when.signed_duration_since(Utc::now());
    Some(delta.to_std().unwrap_or(Duration::ZERO))
}
