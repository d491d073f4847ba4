//! Readiness probe errors.
//!
//! Uses `thiserror` for the error definitions and converts each variant
//! directly into the `503 not ready` API response.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Why a readiness probe did not succeed.
///
/// The display string of each variant is the machine-readable reason sent to
/// clients. The wrapped backend error is only ever logged.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    /// The database handle could not yield a usable connection.
    #[error("database connection error")]
    Connection(#[source] anyhow::Error),

    /// A connection was obtained but did not answer the ping.
    #[error("database ping failed")]
    Ping(#[source] anyhow::Error),
}

/// JSON body sent to clients when the service is not ready.
#[derive(Serialize)]
struct NotReadyResponse {
    status: &'static str,
    error: String,
}

impl ProbeError {
    /// Map error to HTTP status code.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Connection(_) | Self::Ping(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Reason string reported in the `error` field.
    pub fn reason(&self) -> String {
        self.to_string()
    }

    /// The underlying backend error, for logs only.
    pub fn backend(&self) -> &anyhow::Error {
        match self {
            Self::Connection(e) | Self::Ping(e) => e,
        }
    }
}

impl IntoResponse for ProbeError {
    fn into_response(self) -> Response {
        let body = NotReadyResponse {
            status: "not ready",
            error: self.reason(),
        };

        (self.status_code(), axum::Json(body)).into_response()
    }
}

pub type ProbeResult<T> = Result<T, ProbeError>;

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        serde_json::from_slice(&bytes).expect("body is JSON")
    }

    #[tokio::test]
    async fn test_connection_error_response() {
        let err = ProbeError::Connection(anyhow::anyhow!("pool closed"));
        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({"status": "not ready", "error": "database connection error"})
        );
    }

    #[tokio::test]
    async fn test_ping_error_response_hides_backend_detail() {
        let err = ProbeError::Ping(anyhow::anyhow!("connection reset by peer at 10.0.0.7"));
        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body = body_json(response).await;
        assert_eq!(body["error"], "database ping failed");
        assert!(!body.to_string().contains("10.0.0.7"));
    }

    #[test]
    fn test_source_is_preserved_for_logging() {
        use std::error::Error;

        let err = ProbeError::Connection(anyhow::anyhow!("pool timed out"));
        let source = err.source().expect("backend error kept as source");
        assert_eq!(source.to_string(), "pool timed out");
    }
}
