//! Provider rate limiting configuration.

use std::time::Duration;

/// Rate limiting configuration for a provider.
///
/// Controls how aggressively we can call a provider to avoid
/// hitting their rate limits and getting blocked.
#[derive(Clone, Debug)]
pub struct RateLimit {
    /// Maximum concurrent requests to this provider.
    pub max_concurrency: usize,

    /// Upper bound for a single quote request.
    pub request_timeout: Duration,
}

impl Default for RateLimit {
    fn default() -> Self {
        Self {
            max_concurrency: 5,
            request_timeout: Duration::from_secs(10),
        }
    }
}
