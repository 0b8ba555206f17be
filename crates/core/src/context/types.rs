use std::future::Future;

use thiserror::Error;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

/// Unique identifier for a request, used for tracing and logging.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestId(String);

impl RequestId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Wraps an id supplied by the caller, e.g. an incoming request header.
    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The call was cancelled before the store answered.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("request cancelled")]
pub struct Cancelled;

/// Per-call context.
///
/// Carries the request id that ends up on every log line of the call and a
/// cancellation token the caller can fire to abort the in-flight store call.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    request_id: RequestId,
    cancellation: CancellationToken,
}

impl RequestContext {
    pub fn new(request_id: RequestId) -> Self {
        Self {
            request_id,
            cancellation: CancellationToken::new(),
        }
    }

    /// Uses `cancellation` instead of a fresh token, so the caller can cancel
    /// several contexts at once (e.g. on Ctrl+C).
    pub fn with_cancellation(mut self, cancellation: CancellationToken) -> Self {
        self.cancellation = cancellation;
        self
    }

    pub fn request_id(&self) -> &RequestId {
        &self.request_id
    }

    pub fn cancel(&self) {
        self.cancellation.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }

    /// Drives `fut` to completion unless the context is cancelled first.
    ///
    /// On cancellation `fut` is dropped, which aborts whatever backend call it
    /// was awaiting.
    pub async fn run<F>(&self, fut: F) -> Result<F::Output, Cancelled>
    where
        F: Future,
    {
        tokio::select! {
            biased;
            _ = self.cancellation.cancelled() => Err(Cancelled),
            output = fut => Ok(output),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_request_ids_are_unique() {
        assert_ne!(RequestId::new(), RequestId::new());
    }

    #[test]
    fn test_request_id_from_string() {
        let id = RequestId::from_string("req-123");
        assert_eq!(id.as_str(), "req-123");
        assert_eq!(id.to_string(), "req-123");
    }

    #[tokio::test]
    async fn test_run_returns_output_when_not_cancelled() {
        let ctx = RequestContext::default();

        let result = ctx.run(async { 42 }).await;

        assert_eq!(result, Ok(42));
    }

    #[tokio::test]
    async fn test_run_returns_cancelled_when_already_cancelled() {
        let ctx = RequestContext::default();
        ctx.cancel();

        let result = ctx.run(async { 42 }).await;

        assert_eq!(result, Err(Cancelled));
    }

    #[tokio::test]
    async fn test_cancel_aborts_pending_future() {
        let ctx = RequestContext::default();
        let canceller = ctx.clone();

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            canceller.cancel();
        });

        let result = ctx
            .run(async {
                tokio::time::sleep(Duration::from_secs(60)).await;
                42
            })
            .await;

        assert_eq!(result, Err(Cancelled));
    }

    #[tokio::test]
    async fn test_shared_token_cancels_every_context() {
        let token = CancellationToken::new();
        let a = RequestContext::default().with_cancellation(token.clone());
        let b = RequestContext::default().with_cancellation(token.clone());

        token.cancel();

        assert!(a.is_cancelled());
        assert!(b.is_cancelled());
    }
}
