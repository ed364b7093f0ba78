//! Error types for the gateway
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Gateway Error Enum ==
/// Unified error type for the gateway.
///
/// Tool-level failures (`Evaluation`, `Pool`, and `Upstream` faults raised
/// inside a tool) are recovered locally by the tools and turned into
/// descriptive result strings. Only faults raised while the gateway itself
/// invokes the agent graph reach the transport layer.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Malformed input (empty query, bad request body)
    #[error("Invalid request: {0}")]
    Validation(String),

    /// An arithmetic expression contains disallowed characters or exceeds limits
    #[error("Evaluation error: {0}")]
    Evaluation(String),

    /// The agent graph, search backend, or LLM backend failed
    #[error("{0}")]
    Upstream(String),

    /// A task submitted to an execution pool failed during execution
    #[error("Pool error: {0}")]
    Pool(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            GatewayError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            other => (StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
        };

        let body = Json(json!({
            "detail": detail
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the gateway.
pub type Result<T> = std::result::Result<T, GatewayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_maps_to_bad_request() {
        let response = GatewayError::Validation("query cannot be empty".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_upstream_maps_to_server_error() {
        let response = GatewayError::Upstream("agent graph unavailable".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_upstream_message_preserved_verbatim() {
        let err = GatewayError::Upstream("connection refused".to_string());
        assert_eq!(err.to_string(), "connection refused");
    }

    #[test]
    fn test_evaluation_display() {
        let err = GatewayError::Evaluation("disallowed character ';'".to_string());
        assert_eq!(err.to_string(), "Evaluation error: disallowed character ';'");
    }
}
