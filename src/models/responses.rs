//! Response DTOs for the gateway API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

/// Response body for POST /multi-agents.
#[derive(Debug, Clone, Serialize)]
pub struct AnswerResponse {
    /// The agent's answer
    pub answer: String,
}

impl AnswerResponse {
    pub fn new(answer: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
        }
    }
}

/// Response body for POST /cache-multi-agents.
#[derive(Debug, Clone, Serialize)]
pub struct CachedAnswerResponse {
    /// The agent's answer
    pub answer: String,
    /// Whether the answer was served from the cache
    pub cached: bool,
}

impl CachedAnswerResponse {
    pub fn new(answer: impl Into<String>, cached: bool) -> Self {
        Self {
            answer: answer.into(),
            cached,
        }
    }
}

/// Response body for the stats endpoint (GET /stats).
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses
    pub misses: u64,
    /// Number of evictions
    pub evictions: u64,
    /// Current number of entries in the cache
    pub total_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl StatsResponse {
    /// Creates a new StatsResponse from cache statistics.
    pub fn new(hits: u64, misses: u64, evictions: u64, total_entries: usize) -> Self {
        let total_requests = hits + misses;
        let hit_rate = if total_requests > 0 {
            hits as f64 / total_requests as f64
        } else {
            0.0
        };
        Self {
            hits,
            misses,
            evictions,
            total_entries,
            hit_rate,
        }
    }
}

/// Response body for the health endpoint (GET /health).
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp.
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all fault conditions.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Description of the fault
    pub detail: String,
}

impl ErrorResponse {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}
