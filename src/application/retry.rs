//! Fresh-session retry for exchange calls.
//!
//! Every attempt asks the [`SessionFactory`] for a new session and waits a
//! random jitter before calling, so a client whose clock drifted is never
//! reused. Only [`ExchangeError::TimeDesync`] is retried.

use std::future::Future;
use std::time::Duration;

use rand::Rng;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::error::ExchangeError;
use crate::port::outbound::exchange::{ExchangeSession, SessionFactory};

/// Bounds and pacing for [`call_with_fresh_session`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total calls allowed; the last one is returned whatever its outcome.
    pub max_attempts: u32,
    /// Lower bound of the pre-call jitter.
    pub jitter_min: Duration,
    /// Upper bound of the pre-call jitter.
    pub jitter_max: Duration,
}

impl RetryPolicy {
    #[must_use]
    pub const fn new(max_attempts: u32, jitter_min: Duration, jitter_max: Duration) -> Self {
        Self {
            max_attempts,
            jitter_min,
            jitter_max,
        }
    }

    /// Policy without jitter.
    #[must_use]
    pub const fn immediate(max_attempts: u32) -> Self {
        Self::new(max_attempts, Duration::ZERO, Duration::ZERO)
    }

    fn jitter(&self) -> Duration {
        if self.jitter_max <= self.jitter_min {
            return self.jitter_min;
        }
        let min = self.jitter_min.as_millis() as u64;
        let max = self.jitter_max.as_millis() as u64;
        Duration::from_millis(rand::thread_rng().gen_range(min..=max))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(5, Duration::from_millis(500), Duration::from_millis(1000))
    }
}

/// Run `call` against a fresh session, retrying clock-desync failures.
///
/// At most `policy.max_attempts` calls are made. Any error other than a time
/// desync is returned immediately, and the last attempt's result is returned
/// unchanged. A zero bound still makes one call.
///
/// # Errors
///
/// Returns the first non-desync error, a session construction error, or the
/// outcome of the last attempt.
pub async fn call_with_fresh_session<T, F, Fut>(
    factory: &dyn SessionFactory,
    policy: &RetryPolicy,
    operation: &'static str,
    call: F,
) -> Result<T, ExchangeError>
where
    F: Fn(Box<dyn ExchangeSession>) -> Fut,
    Fut: Future<Output = Result<T, ExchangeError>>,
{
    for attempt in 1..=policy.max_attempts {
        let session = factory.create_session()?;
        let delay = policy.jitter();
        if !delay.is_zero() {
            sleep(delay).await;
        }

        debug!(operation, attempt, exchange = session.exchange_name(), "Calling exchange");
        match call(session).await {
            Err(err) if err.is_time_desync() && attempt < policy.max_attempts => {
                warn!(
                    operation,
                    attempt,
                    max_attempts = policy.max_attempts,
                    error = %err,
                    "Clock desync, retrying with a fresh session"
                );
            }
            result => return result,
        }
    }

    let session = factory.create_session()?;
    call(session).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::exchange::{desync, ScriptedExchange};
    use crate::testkit::domain::account_info;
    use rust_decimal_macros::dec;

    async fn fetch(exchange: &ScriptedExchange, policy: &RetryPolicy) -> Result<(), ExchangeError> {
        call_with_fresh_session(exchange, policy, "account_info", |session| async move {
            session.account_info().await.map(|_| ())
        })
        .await
    }

    #[tokio::test]
    async fn desync_then_success_uses_one_session_per_attempt() {
        let exchange = ScriptedExchange::new();
        exchange.push_account(Err(desync()));
        exchange.push_account(Err(desync()));
        exchange.push_account(Ok(account_info("USDT", dec!(10))));

        let result = fetch(&exchange, &RetryPolicy::immediate(5)).await;

        assert!(result.is_ok());
        assert_eq!(exchange.account_calls(), 3);
        assert_eq!(exchange.sessions_created(), 3);
    }

    #[tokio::test]
    async fn other_errors_are_not_retried() {
        let exchange = ScriptedExchange::new();
        exchange.push_account(Err(ExchangeError::Api {
            code: -2015,
            message: "Invalid API-key".into(),
        }));
        exchange.push_account(Ok(account_info("USDT", dec!(10))));

        let result = fetch(&exchange, &RetryPolicy::immediate(5)).await;

        assert!(matches!(result, Err(ExchangeError::Api { code: -2015, .. })));
        assert_eq!(exchange.account_calls(), 1);
    }

    #[tokio::test]
    async fn persistent_desync_stops_at_max_attempts() {
        let exchange = ScriptedExchange::new();
        for _ in 0..10 {
            exchange.push_account(Err(desync()));
        }

        let result = fetch(&exchange, &RetryPolicy::immediate(5)).await;

        assert!(matches!(result, Err(ExchangeError::TimeDesync { .. })));
        assert_eq!(exchange.account_calls(), 5);
        assert_eq!(exchange.sessions_created(), 5);
    }

    #[tokio::test]
    async fn success_on_last_attempt_is_returned() {
        let exchange = ScriptedExchange::new();
        for _ in 0..4 {
            exchange.push_account(Err(desync()));
        }
        exchange.push_account(Ok(account_info("USDT", dec!(1))));

        let result = fetch(&exchange, &RetryPolicy::immediate(5)).await;

        assert!(result.is_ok());
        assert_eq!(exchange.account_calls(), 5);
    }

    #[tokio::test]
    async fn zero_bound_still_calls_once() {
        let exchange = ScriptedExchange::new();
        exchange.push_account(Err(desync()));

        let result = fetch(&exchange, &RetryPolicy::immediate(0)).await;

        assert!(result.is_err());
        assert_eq!(exchange.account_calls(), 1);
    }

    #[tokio::test]
    async fn session_construction_errors_propagate() {
        let exchange = ScriptedExchange::new();
        exchange.fail_sessions(ExchangeError::Credentials("BINANCE_API_KEY"));

        let result = fetch(&exchange, &RetryPolicy::immediate(5)).await;

        assert_eq!(result, Err(ExchangeError::Credentials("BINANCE_API_KEY")));
        assert_eq!(exchange.account_calls(), 0);
    }

    #[test]
    fn jitter_stays_within_bounds() {
        let policy = RetryPolicy::new(5, Duration::from_millis(500), Duration::from_millis(1000));
        for _ in 0..50 {
            let delay = policy.jitter();
            assert!(delay >= Duration::from_millis(500));
            assert!(delay <= Duration::from_millis(1000));
        }
    }
}
