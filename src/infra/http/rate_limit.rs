use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;

/// Sliding-window limiter keyed by client and route.
#[derive(Debug, Clone)]
pub struct SubmissionRateLimiter {
    window: Duration,
    max_requests: u32,
    buckets: Arc<DashMap<String, Vec<Instant>>>,
}

impl SubmissionRateLimiter {
    pub fn new(window: Duration, max_requests: u32) -> Self {
        Self {
            window,
            max_requests,
            buckets: Arc::new(DashMap::new()),
        }
    }

    /// Record a request; on rejection returns the seconds until a slot frees up.
    pub fn check(&self, client: &str, route: &str) -> Result<u32, u64> {
        self.check_at(client, route, Instant::now())
    }

    fn check_at(&self, client: &str, route: &str, now: Instant) -> Result<u32, u64> {
        let window = self.window;
        let mut entry = self.buckets.entry(format!("{client}:{route}")).or_default();
        entry.retain(|instant| now.saturating_duration_since(*instant) < window);

        let used = u32::try_from(entry.len()).unwrap_or(u32::MAX);
        if used >= self.max_requests {
            let oldest = entry.first().copied().unwrap_or(now);
            let wait = window.saturating_sub(now.saturating_duration_since(oldest));
            return Err(wait.as_secs().max(1));
        }

        entry.push(now);
        Ok(self.max_requests - used - 1)
    }

    pub fn limit(&self) -> u32 {
        self.max_requests
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_after_limit_within_window() {
        let limiter = SubmissionRateLimiter::new(Duration::from_secs(60), 2);
        let start = Instant::now();

        assert_eq!(limiter.check_at("1.2.3.4", "contact", start), Ok(1));
        assert_eq!(limiter.check_at("1.2.3.4", "contact", start), Ok(0));
        let retry = limiter
            .check_at("1.2.3.4", "contact", start + Duration::from_secs(20))
            .unwrap_err();
        assert_eq!(retry, 40);
    }

    #[test]
    fn clients_and_routes_have_separate_buckets() {
        let limiter = SubmissionRateLimiter::new(Duration::from_secs(60), 1);
        let now = Instant::now();

        assert!(limiter.check_at("a", "contact", now).is_ok());
        assert!(limiter.check_at("b", "contact", now).is_ok());
        assert!(limiter.check_at("a", "fatwa", now).is_ok());
        assert!(limiter.check_at("a", "contact", now).is_err());
    }

    #[test]
    fn window_expiry_frees_slots() {
        let limiter = SubmissionRateLimiter::new(Duration::from_secs(10), 1);
        let start = Instant::now();

        assert!(limiter.check_at("a", "contact", start).is_ok());
        assert!(limiter.check_at("a", "contact", start).is_err());
        assert!(
            limiter
                .check_at("a", "contact", start + Duration::from_secs(10))
                .is_ok()
        );
    }
}
