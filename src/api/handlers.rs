//! API Handlers
//!
//! HTTP request handlers for each gateway endpoint.

use std::sync::Arc;

use axum::{extract::State, Json};

use crate::cache::SharedCache;
use crate::error::{GatewayError, Result};
use crate::gateway::AnswerGateway;
use crate::models::{
    AnswerResponse, CachedAnswerResponse, HealthResponse, QueryRequest, StatsResponse,
};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Process-wide result cache (also reachable through the gateway/tools)
    pub cache: SharedCache,
    /// Cache-aside layer over the agent graph
    pub gateway: Arc<AnswerGateway>,
}

impl AppState {
    /// Creates a new AppState from the shared cache and gateway.
    pub fn new(cache: SharedCache, gateway: Arc<AnswerGateway>) -> Self {
        Self { cache, gateway }
    }
}

/// Handler for POST /multi-agents
///
/// Runs the agent graph for every request, bypassing the answer cache.
pub async fn query_handler(
    State(state): State<AppState>,
    Json(req): Json<QueryRequest>,
) -> Result<Json<AnswerResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(GatewayError::Validation(error_msg));
    }

    let answer = state.gateway.handle_fresh(&req.query).await?;
    Ok(Json(AnswerResponse::new(answer)))
}

/// Handler for POST /cache-multi-agents
///
/// Serves from the answer cache when possible; the response reports whether
/// the answer was cached.
pub async fn cached_query_handler(
    State(state): State<AppState>,
    Json(req): Json<QueryRequest>,
) -> Result<Json<CachedAnswerResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(GatewayError::Validation(error_msg));
    }

    let outcome = state.gateway.handle_cached(&req.query).await?;
    Ok(Json(CachedAnswerResponse::new(outcome.answer, outcome.cached)))
}

/// Handler for GET /stats
///
/// Returns current cache statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let cache = state.cache.read().await;
    let stats = cache.stats();

    Json(StatsResponse::new(
        stats.hits,
        stats.misses,
        stats.evictions,
        stats.total_entries,
    ))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::AgentGraph;
    use crate::cache::TtlCache;
    use async_trait::async_trait;

    struct UppercaseAgent;

    #[async_trait]
    impl AgentGraph for UppercaseAgent {
        async fn invoke(&self, query: &str) -> Result<String> {
            Ok(query.to_uppercase())
        }
    }

    fn test_state() -> AppState {
        let cache = TtlCache::unbounded().shared();
        let gateway = Arc::new(AnswerGateway::new(
            cache.clone(),
            Arc::new(UppercaseAgent),
            300,
        ));
        AppState::new(cache, gateway)
    }

    #[tokio::test]
    async fn test_query_handler_answers() {
        let state = test_state();

        let req = QueryRequest {
            query: "hello".to_string(),
        };
        let response = query_handler(State(state), Json(req)).await.unwrap();
        assert_eq!(response.answer, "HELLO");
    }

    #[tokio::test]
    async fn test_cached_query_handler_reports_provenance() {
        let state = test_state();

        let req = QueryRequest {
            query: "hello".to_string(),
        };
        let first = cached_query_handler(State(state.clone()), Json(req.clone()))
            .await
            .unwrap();
        assert!(!first.cached);

        let second = cached_query_handler(State(state), Json(req)).await.unwrap();
        assert!(second.cached);
        assert_eq!(second.answer, "HELLO");
    }

    #[tokio::test]
    async fn test_empty_query_rejected() {
        let state = test_state();

        let req = QueryRequest {
            query: "  ".to_string(),
        };
        let result = query_handler(State(state), Json(req)).await;
        assert!(matches!(result, Err(GatewayError::Validation(_))));
    }

    #[tokio::test]
    async fn test_stats_handler() {
        let state = test_state();

        let response = stats_handler(State(state)).await;
        assert_eq!(response.hits, 0);
        assert_eq!(response.misses, 0);
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }
}
