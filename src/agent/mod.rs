//! Agent Module
//!
//! Boundary to the agent orchestration graph. The gateway only knows the
//! `AgentGraph` trait; `ToolRouterGraph` is the concrete collaborator wired
//! up by the binary, holding the explicitly registered tool set and routing
//! each query to one of them.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::error::{GatewayError, Result};
use crate::eval;
use crate::tools::Tool;

// == Agent Graph Trait ==
/// The agent pipeline that turns a query into a final answer.
#[async_trait]
pub trait AgentGraph: Send + Sync {
    /// Produces an answer for `query`. Faults are surfaced as `Upstream`.
    async fn invoke(&self, query: &str) -> Result<String>;
}

// == Tool Router Graph ==
/// Minimal orchestration: classify the query and hand it to the matching
/// registered tool. Arithmetic-looking input goes to the math tool,
/// everything else to the search tool.
pub struct ToolRouterGraph {
    search: Arc<dyn Tool>,
    math: Arc<dyn Tool>,
}

impl ToolRouterGraph {
    /// Registers the fixed tool set.
    pub fn new(search: Arc<dyn Tool>, math: Arc<dyn Tool>) -> Self {
        Self { search, math }
    }
}

#[async_trait]
impl AgentGraph for ToolRouterGraph {
    async fn invoke(&self, query: &str) -> Result<String> {
        let tool = if eval::is_arithmetic(query) {
            &self.math
        } else {
            &self.search
        };
        info!(query, tool = tool.name(), "routing query");

        let answer = tool.invoke(query).await;
        if answer.is_empty() {
            return Err(GatewayError::Upstream(
                "agent produced an empty answer".to_string(),
            ));
        }
        Ok(answer)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    struct NamedStub(&'static str);

    #[async_trait]
    impl Tool for NamedStub {
        fn name(&self) -> &str {
            self.0
        }
        fn description(&self) -> &str {
            "stub"
        }
        async fn invoke(&self, _input: &str) -> String {
            format!("handled by {}", self.0)
        }
    }

    #[tokio::test]
    async fn test_arithmetic_routes_to_math_tool() {
        let graph = ToolRouterGraph::new(Arc::new(NamedStub("search")), Arc::new(NamedStub("math")));

        let answer = graph.invoke("2+2").await.unwrap();
        assert_eq!(answer, "handled by math");
    }

    #[tokio::test]
    async fn test_text_routes_to_search_tool() {
        let graph = ToolRouterGraph::new(Arc::new(NamedStub("search")), Arc::new(NamedStub("math")));

        let answer = graph.invoke("latest rust release").await.unwrap();
        assert_eq!(answer, "handled by search");
    }

    #[tokio::test]
    async fn test_empty_answer_is_upstream_fault() {
        struct Silent;

        #[async_trait]
        impl Tool for Silent {
            fn name(&self) -> &str {
                "silent"
            }
            fn description(&self) -> &str {
                "stub"
            }
            async fn invoke(&self, _input: &str) -> String {
                String::new()
            }
        }

        let graph = ToolRouterGraph::new(Arc::new(Silent), Arc::new(Silent));
        let result = graph.invoke("anything").await;
        assert!(matches!(result, Err(GatewayError::Upstream(_))));
    }
}
