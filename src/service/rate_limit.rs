use crate::config::LoginRateLimitConfig;
use crate::database::security_log::SecurityLogRepository;
use crate::models::security_event::security_events;
use chrono::{DateTime, Duration, Utc};

/// Decides whether an origin may attempt a login, based on its recent `LOGIN_FAIL` events.
///
/// The window is derived from `security_logs` on every call; nothing is stored here.
pub struct LoginRateLimiter<'a> {
    repo: &'a dyn SecurityLogRepository,
    config: &'a LoginRateLimitConfig,
}

impl<'a> LoginRateLimiter<'a> {
    pub fn new(repo: &'a dyn SecurityLogRepository, config: &'a LoginRateLimitConfig) -> Self {
        Self { repo, config }
    }

    /// `true` when the identifier is still allowed to attempt a login.
    ///
    /// Fails open: if the count cannot be read the attempt is allowed, so an
    /// outage of the log store never locks the administrator out.
    pub async fn check_rate_limit(&self, identifier: &str) -> bool {
        self.check_rate_limit_at(identifier, Utc::now()).await
    }

    pub(crate) async fn check_rate_limit_at(&self, identifier: &str, now: DateTime<Utc>) -> bool {
        let since = window_start(now, self.config);

        match self.repo.count_security_events_since(security_events::LOGIN_FAIL, identifier, since).await {
            Ok(failures) => {
                let allowed = failures < self.config.max_failures;
                if !allowed {
                    tracing::warn!(
                        category = "security",
                        ip = identifier,
                        failures = failures,
                        window_minutes = self.config.window_minutes,
                        "login rate limit exceeded"
                    );
                }
                allowed
            }
            Err(err) => {
                tracing::error!(
                    category = "security",
                    ip = identifier,
                    error = ?err,
                    "rate limit check failed, allowing attempt"
                );
                true
            }
        }
    }
}

fn window_start(now: DateTime<Utc>, config: &LoginRateLimitConfig) -> DateTime<Utc> {
    now - Duration::minutes(config.window_minutes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{MockRepository, security_event_at};

    const IP: &str = "203.0.113.7";

    fn seed_failures(repo: &MockRepository, ages_in_minutes: &[i64]) {
        for age in ages_in_minutes {
            repo.seed_security_event(security_event_at(security_events::LOGIN_FAIL, IP, Utc::now() - Duration::minutes(*age)));
        }
    }

    #[test]
    fn window_start_uses_configured_minutes() {
        let now = Utc::now();
        let config = LoginRateLimitConfig::default();
        assert_eq!(now - window_start(now, &config), Duration::minutes(15));
    }

    #[tokio::test]
    async fn four_failures_are_allowed() {
        let repo = MockRepository::new();
        seed_failures(&repo, &[1, 2, 3, 4]);
        let config = LoginRateLimitConfig::default();

        assert!(LoginRateLimiter::new(&repo, &config).check_rate_limit(IP).await);
    }

    #[tokio::test]
    async fn five_failures_block() {
        let repo = MockRepository::new();
        seed_failures(&repo, &[1, 2, 3, 4, 10]);
        let config = LoginRateLimitConfig::default();

        assert!(!LoginRateLimiter::new(&repo, &config).check_rate_limit(IP).await);
    }

    fn seed_at(repo: &MockRepository, created_at: DateTime<Utc>) {
        repo.seed_security_event(security_event_at(security_events::LOGIN_FAIL, IP, created_at));
    }

    #[tokio::test]
    async fn failure_exactly_at_window_start_counts() {
        let repo = MockRepository::new();
        let now = Utc::now();
        for age in 1..=4 {
            seed_at(&repo, now - Duration::minutes(age));
        }
        seed_at(&repo, now - Duration::minutes(15));
        let config = LoginRateLimitConfig::default();

        assert!(!LoginRateLimiter::new(&repo, &config).check_rate_limit_at(IP, now).await);
    }

    #[tokio::test]
    async fn failure_just_before_window_start_is_ignored() {
        let repo = MockRepository::new();
        let now = Utc::now();
        for age in 1..=4 {
            seed_at(&repo, now - Duration::minutes(age));
        }
        seed_at(&repo, now - Duration::minutes(15) - Duration::seconds(1));
        let config = LoginRateLimitConfig::default();

        assert!(LoginRateLimiter::new(&repo, &config).check_rate_limit_at(IP, now).await);
    }

    #[tokio::test]
    async fn failures_outside_window_are_ignored() {
        let repo = MockRepository::new();
        seed_failures(&repo, &[1, 2, 3, 4, 16]);
        let config = LoginRateLimitConfig::default();

        assert!(LoginRateLimiter::new(&repo, &config).check_rate_limit(IP).await);
    }

    #[tokio::test]
    async fn other_ips_and_event_types_do_not_count() {
        let repo = MockRepository::new();
        for _ in 0..5 {
            repo.seed_security_event(security_event_at(security_events::LOGIN_FAIL, "198.51.100.1", Utc::now()));
            repo.seed_security_event(security_event_at(security_events::LOGIN_SUCCESS, IP, Utc::now()));
        }
        let config = LoginRateLimitConfig::default();

        assert!(LoginRateLimiter::new(&repo, &config).check_rate_limit(IP).await);
    }

    #[tokio::test]
    async fn store_failure_fails_open() {
        let repo = MockRepository::failing();
        let config = LoginRateLimitConfig::default();

        assert!(LoginRateLimiter::new(&repo, &config).check_rate_limit(IP).await);
    }

    #[tokio::test]
    async fn threshold_follows_config() {
        let repo = MockRepository::new();
        seed_failures(&repo, &[1, 2]);
        let config = LoginRateLimitConfig {
            window_minutes: 15,
            max_failures: 2,
        };

        assert!(!LoginRateLimiter::new(&repo, &config).check_rate_limit_at(IP, Utc::now()).await);
    }
}
