use std::time::Duration;

use crate::ai::error::GenerationError;
use crate::ai::provider::{AiProvider, Completion, CompletionRequest};

/// How many extra attempts to make and how long to wait between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub backoff_step: Duration,
}

impl RetryPolicy {
    pub const DEFAULT_BACKOFF_STEP: Duration = Duration::from_millis(500);

    pub fn new(max_retries: u32) -> Self {
        Self {
            max_retries,
            backoff_step: Self::DEFAULT_BACKOFF_STEP,
        }
    }

    /// Delay after the `attempt`-th failure (1-based): 500ms, 1s, 1.5s, ...
    pub fn delay_after(&self, attempt: u32) -> Duration {
        self.backoff_step * attempt
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(2)
    }
}

/// Call `provider` until it succeeds or `policy.max_retries` extra attempts are spent.
///
/// Attempts are strictly sequential with linear backoff in between. Every
/// per-attempt failure (timeout, network, non-2xx, missing text) is retried;
/// once the budget is spent the last failure is returned wrapped in
/// [`GenerationError::Exhausted`].
pub async fn complete_with_retry(
    provider: &dyn AiProvider,
    request: &CompletionRequest,
    policy: RetryPolicy,
) -> Result<Completion, GenerationError> {
    let total_attempts = policy.max_retries.saturating_add(1);
    let mut attempt = 0;

    loop {
        attempt += 1;

        let err = match provider.complete(request).await {
            Ok(completion) => {
                if attempt > 1 {
                    tracing::info!(attempt, "Gemini call succeeded after retry");
                }
                return Ok(completion);
            }
            Err(err) => err,
        };

        if attempt >= total_attempts {
            tracing::error!(
                attempts = attempt,
                category = err.category(),
                error = %err,
                "Gemini retries exhausted"
            );
            return Err(GenerationError::Exhausted {
                attempts: attempt,
                last: Box::new(err),
            });
        }

        let delay = policy.delay_after(attempt);
        tracing::warn!(
            attempt,
            max_attempts = total_attempts,
            category = err.category(),
            error = %err,
            "Gemini call failed, retrying in {:?}",
            delay
        );
        tokio::time::sleep(delay).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Fails the first `failures` calls, then succeeds.
    struct FlakyProvider {
        failures: u32,
        calls: AtomicU32,
    }

    impl FlakyProvider {
        fn new(failures: u32) -> Self {
            Self {
                failures,
                calls: AtomicU32::new(0),
            }
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl AiProvider for FlakyProvider {
        async fn complete(&self, _request: &CompletionRequest) -> Result<Completion, GenerationError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if call <= self.failures {
                Err(GenerationError::Http {
                    status: 500,
                    body: format!("failure {}", call),
                })
            } else {
                Ok(Completion {
                    text: "# ok".to_string(),
                    usage: None,
                })
            }
        }
    }

    fn fast_policy(max_retries: u32) -> RetryPolicy {
        RetryPolicy {
            max_retries,
            backoff_step: Duration::from_millis(1),
        }
    }

    #[test]
    fn test_linear_backoff() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_retries, 2);
        assert_eq!(policy.delay_after(1), Duration::from_millis(500));
        assert_eq!(policy.delay_after(2), Duration::from_millis(1000));
        assert_eq!(policy.delay_after(3), Duration::from_millis(1500));
    }

    #[tokio::test]
    async fn test_always_failing_makes_three_attempts() {
        let provider = FlakyProvider::new(u32::MAX);
        let request = CompletionRequest::markdown("prompt");

        let err = complete_with_retry(&provider, &request, fast_policy(2))
            .await
            .unwrap_err();

        assert_eq!(provider.calls(), 3);
        match err {
            GenerationError::Exhausted { attempts, last } => {
                assert_eq!(attempts, 3);
                assert_eq!(last.to_string(), "Gemini API error (500): failure 3");
            }
            other => panic!("expected Exhausted, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_recovers_after_transient_failure() {
        let provider = FlakyProvider::new(1);
        let request = CompletionRequest::markdown("prompt");

        let completion = complete_with_retry(&provider, &request, fast_policy(2))
            .await
            .unwrap();

        assert_eq!(completion.text, "# ok");
        assert_eq!(provider.calls(), 2);
    }

    #[tokio::test]
    async fn test_zero_retries_makes_single_attempt() {
        let provider = FlakyProvider::new(u32::MAX);
        let request = CompletionRequest::markdown("prompt");

        let err = complete_with_retry(&provider, &request, fast_policy(0))
            .await
            .unwrap_err();

        assert_eq!(provider.calls(), 1);
        assert!(matches!(err, GenerationError::Exhausted { attempts: 1, .. }));
    }

    #[tokio::test]
    async fn test_max_retry_budget_does_not_overflow() {
        let provider = FlakyProvider::new(1);
        let request = CompletionRequest::markdown("prompt");

        let completion = complete_with_retry(&provider, &request, fast_policy(u32::MAX))
            .await
            .unwrap();

        assert_eq!(completion.text, "# ok");
        assert_eq!(provider.calls(), 2);
    }

    #[tokio::test]
    async fn test_success_on_first_attempt_does_not_retry() {
        let provider = FlakyProvider::new(0);
        let request = CompletionRequest::markdown("prompt");

        complete_with_retry(&provider, &request, fast_policy(2))
            .await
            .unwrap();

        assert_eq!(provider.calls(), 1);
    }
}
