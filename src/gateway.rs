//! Answer Cache Gateway Module
//!
//! Cache-aside wrapper around agent invocation. Queries are normalized
//! (trim + lowercase) into the cache key so textual variants of one question
//! share a single cached answer. A fresh variant bypasses the cache for
//! callers that always want a new agent run.

use std::sync::Arc;

use tracing::info;

use crate::agent::AgentGraph;
use crate::cache::SharedCache;
use crate::error::Result;

/// Prefix separating answer keys from tool-level keys in the shared cache.
const ANSWER_KEY_PREFIX: &str = "answer:";

// == Query Outcome ==
/// An answer plus its cache provenance.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryOutcome {
    /// The agent's answer
    pub answer: String,
    /// Whether the answer came from the cache
    pub cached: bool,
}

// == Answer Gateway ==
/// Endpoint-level cache-aside layer over the agent graph.
pub struct AnswerGateway {
    cache: SharedCache,
    agent: Arc<dyn AgentGraph>,
    ttl_seconds: u64,
}

impl AnswerGateway {
    pub fn new(cache: SharedCache, agent: Arc<dyn AgentGraph>, ttl_seconds: u64) -> Self {
        Self {
            cache,
            agent,
            ttl_seconds,
        }
    }

    /// Normalized cache key for a query.
    fn answer_key(query: &str) -> String {
        format!("{ANSWER_KEY_PREFIX}{}", query.trim().to_lowercase())
    }

    // == Handle Cached ==
    /// Answers `query`, short-circuiting through the cache when possible.
    ///
    /// On a miss the agent graph runs and its answer is stored under the
    /// normalized key. Agent faults propagate to the transport layer as
    /// `Upstream` errors; the cache itself never fails.
    pub async fn handle_cached(&self, query: &str) -> Result<QueryOutcome> {
        let key = Self::answer_key(query);

        if let Some(answer) = self.cache.write().await.get(&key) {
            info!(key, "answer cache hit");
            return Ok(QueryOutcome {
                answer,
                cached: true,
            });
        }
        info!(key, "answer cache miss");

        let answer = self.agent.invoke(query).await?;
        self.cache
            .write()
            .await
            .set(key, answer.clone(), self.ttl_seconds);

        Ok(QueryOutcome {
            answer,
            cached: false,
        })
    }

    // == Handle Fresh ==
    /// Always invokes the agent graph, never touching the cache.
    pub async fn handle_fresh(&self, query: &str) -> Result<String> {
        self.agent.invoke(query).await
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::TtlCache;
    use crate::error::GatewayError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingAgent {
        calls: AtomicUsize,
    }

    impl CountingAgent {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl AgentGraph for CountingAgent {
        async fn invoke(&self, query: &str) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(format!("answer to: {query}"))
        }
    }

    struct FaultyAgent;

    #[async_trait]
    impl AgentGraph for FaultyAgent {
        async fn invoke(&self, _query: &str) -> Result<String> {
            Err(GatewayError::Upstream("graph exploded".to_string()))
        }
    }

    fn gateway_with(agent: Arc<dyn AgentGraph>) -> AnswerGateway {
        AnswerGateway::new(TtlCache::unbounded().shared(), agent, 300)
    }

    #[tokio::test]
    async fn test_miss_then_hit() {
        let agent = CountingAgent::new();
        let gateway = gateway_with(agent.clone());

        let first = gateway.handle_cached("What is Rust?").await.unwrap();
        assert!(!first.cached);

        let second = gateway.handle_cached("What is Rust?").await.unwrap();
        assert!(second.cached);
        assert_eq!(second.answer, first.answer);
        assert_eq!(agent.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_normalization_shares_one_entry() {
        let agent = CountingAgent::new();
        let gateway = gateway_with(agent.clone());

        let first = gateway.handle_cached("What is 2+2?").await.unwrap();
        assert!(!first.cached);

        // Different surface form, same normalized key.
        let second = gateway.handle_cached(" what IS 2+2? ").await.unwrap();
        assert!(second.cached);
        assert_eq!(second.answer, first.answer);
        assert_eq!(agent.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_fresh_bypasses_cache() {
        let agent = CountingAgent::new();
        let gateway = gateway_with(agent.clone());

        gateway.handle_fresh("question").await.unwrap();
        gateway.handle_fresh("question").await.unwrap();
        assert_eq!(agent.calls.load(Ordering::SeqCst), 2);

        // Fresh calls leave nothing behind for the cached path.
        let outcome = gateway.handle_cached("question").await.unwrap();
        assert!(!outcome.cached);
    }

    #[tokio::test]
    async fn test_agent_fault_surfaces_as_upstream() {
        let gateway = gateway_with(Arc::new(FaultyAgent));

        let result = gateway.handle_cached("anything").await;
        match result {
            Err(GatewayError::Upstream(msg)) => assert_eq!(msg, "graph exploded"),
            other => panic!("expected upstream error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fault_leaves_cache_empty() {
        let cache = TtlCache::unbounded().shared();
        let gateway = AnswerGateway::new(cache.clone(), Arc::new(FaultyAgent), 300);

        let _ = gateway.handle_cached("anything").await;
        assert_eq!(cache.read().await.len(), 0);
    }
}
