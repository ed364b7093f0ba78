//! Backends Module
//!
//! Trait boundaries for the external collaborators the tools call: the web
//! search service and the LLM completion service. The concrete clients here
//! are thin reqwest wrappers; tests substitute stubs behind the same traits.

mod llm;
mod search;

pub use llm::{LlmBackend, OpenAiCompletion};
pub use search::{SearchBackend, SearchResult, TavilySearch};
