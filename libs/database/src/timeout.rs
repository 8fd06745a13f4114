use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// Deadline applied to every domain service call.
pub const SERVICE_TIMEOUT: Duration = Duration::from_secs(10);

/// The wrapped operation did not finish before its deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("operation timed out after {0:?}")]
pub struct TimedOut(pub Duration);

/// Run `operation` under [`SERVICE_TIMEOUT`].
///
/// When the deadline passes the future is dropped, which also drops (and so
/// rolls back) any transaction it still holds.
pub async fn with_deadline<F, T, E>(operation: F) -> Result<T, E>
where
    F: Future<Output = Result<T, E>>,
    E: From<TimedOut>,
{
    with_timeout(SERVICE_TIMEOUT, operation).await
}

pub async fn with_timeout<F, T, E>(limit: Duration, operation: F) -> Result<T, E>
where
    F: Future<Output = Result<T, E>>,
    E: From<TimedOut>,
{
    match tokio::time::timeout(limit, operation).await {
        Ok(result) => result,
        Err(_) => {
            warn!(timeout_ms = limit.as_millis() as u64, "Service call timed out");
            Err(TimedOut(limit).into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    enum ProbeError {
        Timeout,
        Failed,
    }

    impl From<TimedOut> for ProbeError {
        fn from(_: TimedOut) -> Self {
            ProbeError::Timeout
        }
    }

    #[tokio::test]
    async fn test_fast_operation_passes_through() {
        let result: Result<u32, ProbeError> = with_deadline(async { Ok(7) }).await;
        assert_eq!(result, Ok(7));
    }

    #[tokio::test]
    async fn test_operation_error_is_preserved() {
        let result: Result<u32, ProbeError> = with_deadline(async { Err(ProbeError::Failed) }).await;
        assert_eq!(result, Err(ProbeError::Failed));
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_operation_times_out() {
        let result: Result<u32, ProbeError> = with_deadline(async {
            tokio::time::sleep(Duration::from_secs(11)).await;
            Ok(1)
        })
        .await;
        assert_eq!(result, Err(ProbeError::Timeout));
    }

    #[tokio::test(start_paused = true)]
    async fn test_custom_limit() {
        let result: Result<(), ProbeError> = with_timeout(Duration::from_millis(5), async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            Ok(())
        })
        .await;
        assert_eq!(result, Err(ProbeError::Timeout));
    }
}
