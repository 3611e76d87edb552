//! Retry with exponential back-off and jitter for LLM completion calls.
//!
//! Only transient failures are retried: timeouts, connection errors and 5xx
//! responses. Auth and quota errors return immediately.

use std::future::Future;
use std::time::Duration;

use crate::error::LlmError;

/// Returns `true` for errors that are worth retrying after a back-off delay.
pub(crate) fn is_retriable(err: &LlmError) -> bool {
    match err {
        LlmError::Transport(e) => {
            e.is_timeout() || e.is_connect() || e.status().is_some_and(|s| s.is_server_error())
        }
        LlmError::Timeout => true,
        LlmError::Status { status, .. } => *status >= 500,
        LlmError::Auth(_)
        | LlmError::QuotaExceeded(_)
        | LlmError::EmptyResponse
        | LlmError::Deserialize(_) => false,
    }
}

/// Upper bound for any single wait between attempts.
const MAX_DELAY: Duration = Duration::from_secs(30);

/// Runs `operation` with up to `max_retries` additional attempts on transient errors.
///
/// A provider `Retry-After` hint is honoured as-is (capped at 30 s). Otherwise
/// retry `n` waits `backoff_base_ms × 2ⁿ⁻¹` with ±25 % jitter, also capped.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_ms: u64,
    mut operation: F,
) -> Result<T, LlmError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, LlmError>>,
{
    let mut retries = 0u32;
    loop {
        let err = match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };
        if retries >= max_retries || !is_retriable(&err) {
            return Err(err);
        }

        retries += 1;
        let delay = retry_delay(&err, retries, backoff_base_ms);
        tracing::warn!(
            retry = retries,
            max_retries,
            delay = ?delay,
            error = %err,
            "transient LLM failure, retrying completion"
        );
        tokio::time::sleep(delay).await;
    }
}

/// Wait before retry number `retry` (1-based).
fn retry_delay(err: &LlmError, retry: u32, backoff_base_ms: u64) -> Duration {
    if let LlmError::Status {
        retry_after: Some(hint),
        ..
    } = err
    {
        return (*hint).min(MAX_DELAY);
    }

    let exponent = retry.saturating_sub(1).min(10);
    let base =
        Duration::from_millis(backoff_base_ms.saturating_mul(1u64 << exponent)).min(MAX_DELAY);
    base.mul_f64(rand::random_range(0.75..=1.25)).min(MAX_DELAY)
}
