//! Timeout wrapper for async operations.

use clientele_core::ClienteleError;
use std::time::Duration;

/// Wraps an async operation with a timeout.
///
/// An elapsed timeout becomes `ClienteleError::Timeout`; errors returned by
/// the operation itself pass through unchanged.
pub async fn with_timeout<F, Fut, T>(duration: Duration, f: F) -> Result<T, ClienteleError>
where
    F: FnOnce() -> Fut,
    Fut: std::future::Future<Output = Result<T, ClienteleError>>,
{
    tokio::time::timeout(duration, f())
        .await
        .map_err(|_| ClienteleError::Timeout(format!("Operation timed out after {duration:?}")))?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_timeout_success() {
        let result =
            with_timeout(Duration::from_secs(1), || async { Ok::<_, ClienteleError>(42) }).await;
        assert_eq!(result.unwrap(), 42);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_exceeded() {
        let result = with_timeout(Duration::from_millis(10), || async {
            tokio::time::sleep(Duration::from_millis(100)).await;
            Ok::<_, ClienteleError>(42)
        })
        .await;

        assert!(matches!(result, Err(ClienteleError::Timeout(_))));
    }

    #[tokio::test]
    async fn test_inner_error_passes_through() {
        let result = with_timeout(Duration::from_secs(1), || async {
            Err::<(), _>(ClienteleError::BackingStoreUnavailable)
        })
        .await;

        assert!(matches!(result, Err(ClienteleError::BackingStoreUnavailable)));
    }
}
