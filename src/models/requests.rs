//! Request DTOs for the gateway API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

/// Request body for both query endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct QueryRequest {
    /// The user's question
    pub query: String,
}

impl QueryRequest {
    /// Validates the request data.
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.query.trim().is_empty() {
            return Some("Query cannot be empty".to_string());
        }
        None
    }
}
