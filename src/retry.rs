//! Retry policies for non-streaming requests.
//!
//! The transport never retries on its own. Services wrap each non-streaming
//! call in [`with_retry`] when the client has a policy configured; streams are
//! single-shot and never retried.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use crate::error::{TabbyError, TabbyResult};

/// Decides whether and when a failed request is attempted again.
pub trait RetryPolicy: Send + Sync {
    /// Whether the request that failed with `error` should be retried.
    fn should_retry(&self, error: &TabbyError) -> bool;

    /// Delay before retry number `attempt` (starting at 1).
    fn retry_delay(&self, attempt: u32) -> Duration;

    /// Maximum number of retries after the first attempt.
    fn max_retries(&self) -> u32;
}

type RetryableFn = Box<dyn Fn(&TabbyError) -> bool + Send + Sync>;
type DelayFn = Box<dyn Fn(u32) -> Duration + Send + Sync>;

/// A [`RetryPolicy`] assembled from closures.
///
/// # Example
///
/// ```ignore
/// let policy = SimpleRetryPolicy::new(5)
///     .with_delay(|_| Duration::from_millis(250))
///     .with_retryable(|err| err.is_retryable() || err.http_status_code() == 429);
/// ```
pub struct SimpleRetryPolicy {
    max_retries: u32,
    delay: DelayFn,
    retryable: RetryableFn,
}

impl SimpleRetryPolicy {
    /// Policy with `max_retries` attempts, exponential backoff and the
    /// default transient-error classification.
    pub fn new(max_retries: u32) -> Self {
        Self {
            max_retries,
            delay: Box::new(backoff_with_jitter),
            retryable: Box::new(TabbyError::is_retryable),
        }
    }

    /// Replace the delay function.
    pub fn with_delay<F>(mut self, delay: F) -> Self
    where
        F: Fn(u32) -> Duration + Send + Sync + 'static,
    {
        self.delay = Box::new(delay);
        self
    }

    /// Replace the retry predicate.
    pub fn with_retryable<F>(mut self, retryable: F) -> Self
    where
        F: Fn(&TabbyError) -> bool + Send + Sync + 'static,
    {
        self.retryable = Box::new(retryable);
        self
    }
}

impl fmt::Debug for SimpleRetryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimpleRetryPolicy")
            .field("max_retries", &self.max_retries)
            .finish_non_exhaustive()
    }
}

impl RetryPolicy for SimpleRetryPolicy {
    fn should_retry(&self, error: &TabbyError) -> bool {
        (self.retryable)(error)
    }

    fn retry_delay(&self, attempt: u32) -> Duration {
        (self.delay)(attempt)
    }

    fn max_retries(&self) -> u32 {
        self.max_retries
    }
}

/// Default policy: 3 retries, exponential backoff with jitter, retrying
/// network failures and 5xx responses.
pub fn default_retry_policy() -> SimpleRetryPolicy {
    SimpleRetryPolicy::new(3)
}

/// `2^(attempt-1)` seconds plus up to `100 * attempt` ms of jitter.
fn backoff_with_jitter(attempt: u32) -> Duration {
    let attempt = attempt.max(1);
    let step = (attempt - 1).min(16);
    let base_ms = 1_000u64 << step;
    let jitter_cap = 100 * u64::from(attempt);
    let jitter = rand::random::<u64>() % (jitter_cap + 1);
    Duration::from_millis(base_ms + jitter)
}

/// Run `op` under `policy`, sleeping between attempts.
///
/// Returns the first success, or the last error once the policy declines
/// or the retry budget is spent.
pub async fn with_retry<T, F, Fut>(
    policy: &dyn RetryPolicy,
    operation: &str,
    mut op: F,
) -> TabbyResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = TabbyResult<T>>,
{
    let mut attempt = 0;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if attempt >= policy.max_retries() || !policy.should_retry(&err) {
                    return Err(err);
                }
                attempt += 1;
                let delay = policy.retry_delay(attempt);
                tracing::warn!(
                    "{} failed ({}), retrying in {:?} (attempt {}/{})",
                    operation,
                    err,
                    delay,
                    attempt,
                    policy.max_retries()
                );
                tokio::time::sleep(delay).await;
            }
        }
    }
}
