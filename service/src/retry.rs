//! [`RetryPolicy`] definitions.

use std::{fmt, future::Future, time::Duration};

use smart_default::SmartDefault;
use tokio::time;
use tracing as log;

/// Policy of retrying a failed operation a few times before giving up.
#[derive(Clone, Copy, Debug, Eq, PartialEq, SmartDefault)]
pub struct RetryPolicy {
    /// Total number of attempts, including the first one.
    ///
    /// `0` is treated as `1`.
    #[default(3)]
    pub attempts: u8,

    /// Fixed delay between two consecutive attempts.
    #[default(Duration::from_millis(500))]
    pub backoff: Duration,
}

impl RetryPolicy {
    /// Runs the provided `op` until it succeeds or the attempts are
    /// exhausted, sleeping for the [`RetryPolicy::backoff`] in between.
    ///
    /// Every failure is logged with the provided `what` description.
    ///
    /// # Errors
    ///
    /// With the error of the last attempt.
    pub async fn run<T, E, F, Fut>(&self, what: &str, mut op: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: fmt::Display,
    {
        let attempts = self.attempts.max(1);
        let mut attempt = 1;
        loop {
            match op().await {
                Ok(ok) => return Ok(ok),
                Err(e) if attempt < attempts => {
                    log::warn!(
                        "{what} failed on attempt {attempt}/{attempts}, \
                         retrying in {:?}: {e}",
                        self.backoff,
                    );
                    time::sleep(self.backoff).await;
                    attempt += 1;
                }
                Err(e) => {
                    log::error!(
                        "{what} failed after {attempts} attempts, \
                         giving up: {e}",
                    );
                    return Err(e);
                }
            }
        }
    }
}

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use super::RetryPolicy;

    fn policy(attempts: u8) -> RetryPolicy {
        RetryPolicy {
            attempts,
            backoff: Duration::ZERO,
        }
    }

    #[test]
    fn defaults_to_three_attempts() {
        let policy = RetryPolicy::default();

        assert_eq!(policy.attempts, 3);
        assert_eq!(policy.backoff, Duration::from_millis(500));
    }

    #[tokio::test]
    async fn succeeds_after_transient_failures() {
        let mut calls = 0;
        let res = policy(3)
            .run("load", || {
                calls += 1;
                let n = calls;
                async move { if n < 3 { Err("down") } else { Ok(n) } }
            })
            .await;

        assert_eq!(res, Ok(3));
    }

    #[tokio::test]
    async fn gives_up_after_last_attempt() {
        let mut calls = 0;
        let res: Result<(), _> = policy(3)
            .run("load", || {
                calls += 1;
                async { Err("down") }
            })
            .await;

        assert_eq!(res, Err("down"));
        assert_eq!(calls, 3);
    }

    #[tokio::test]
    async fn makes_at_least_one_attempt() {
        let mut calls = 0;
        let res: Result<(), _> = policy(0)
            .run("load", || {
                calls += 1;
                async { Err("down") }
            })
            .await;

        assert_eq!(res, Err("down"));
        assert_eq!(calls, 1);
    }
}
