use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::time::{Duration, Instant};

use crate::error::{Result, StrategicInsightError};

/// Sliding-window in-memory rate limiter, keyed per tool, protecting the
/// engine from runaway callers
#[derive(Clone)]
pub struct RateLimiter {
    /// Map of tool name to recent request timestamps
    windows: Arc<Mutex<HashMap<String, Vec<Instant>>>>,
    max_requests: usize,
    window_duration: Duration,
}

impl RateLimiter {
    pub fn new(max_requests: usize, window_seconds: u64) -> Self {
        Self {
            windows: Arc::new(Mutex::new(HashMap::new())),
            max_requests,
            window_duration: Duration::from_secs(window_seconds),
        }
    }

    /// Record a request for `tool` and fail if it exceeds the window limit
    pub async fn check_rate_limit(&self, tool: &str) -> Result<()> {
        let mut windows = self.windows.lock().await;
        let now = Instant::now();

        let timestamps = windows.entry(tool.to_string()).or_default();
        timestamps.retain(|&t| now.duration_since(t) < self.window_duration);

        if timestamps.len() >= self.max_requests {
            tracing::warn!(
                "Rate limit exceeded for '{}': {} requests in {:?}",
                tool,
                timestamps.len(),
                self.window_duration
            );
            return Err(StrategicInsightError::RateLimit);
        }

        timestamps.push(now);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_allows_requests_under_limit() {
        let limiter = RateLimiter::new(5, 60);
        for _ in 0..5 {
            assert!(limiter.check_rate_limit("bo_update_analysis").await.is_ok());
        }
    }

    #[tokio::test]
    async fn test_blocks_over_limit() {
        let limiter = RateLimiter::new(3, 60);
        for _ in 0..3 {
            assert!(limiter.check_rate_limit("bo_apply_insight").await.is_ok());
        }
        assert!(matches!(
            limiter.check_rate_limit("bo_apply_insight").await,
            Err(StrategicInsightError::RateLimit)
        ));
    }

    #[tokio::test]
    async fn test_tools_are_limited_independently() {
        let limiter = RateLimiter::new(1, 60);
        assert!(limiter.check_rate_limit("bo_save_session").await.is_ok());
        assert!(limiter.check_rate_limit("bo_save_session").await.is_err());
        assert!(limiter.check_rate_limit("bo_load_session").await.is_ok());
    }

    #[tokio::test]
    async fn test_sliding_window_recovers() {
        let limiter = RateLimiter::new(1, 1);
        assert!(limiter.check_rate_limit("bo_get_state").await.is_ok());
        assert!(limiter.check_rate_limit("bo_get_state").await.is_err());

        tokio::time::sleep(Duration::from_millis(1100)).await;
        assert!(limiter.check_rate_limit("bo_get_state").await.is_ok());
    }
}
