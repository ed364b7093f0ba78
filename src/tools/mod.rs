//! Tools Module
//!
//! The fixed set of capabilities the agent graph can call: web search and
//! math solving. Each tool owns its full dispatch sequence — check cache,
//! dispatch to the right execution pool, store the result, return — and
//! recovers every failure into a descriptive result string so the agent
//! pipeline can reason about errors as ordinary tool output.

mod math;
mod search;

pub use math::MathTool;
pub use search::SearchTool;

use async_trait::async_trait;

// == Tool Trait ==
/// A capability invocable by the agent graph.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Tool name, used for registration and logging.
    fn name(&self) -> &str;

    /// What the tool does, shown to the orchestrating agent.
    fn description(&self) -> &str;

    /// Runs the tool. Never fails: errors come back as descriptive strings.
    async fn invoke(&self, input: &str) -> String;
}
