//! Agent Gateway - a cached query-answering service
//!
//! Wraps an agent pipeline with a result cache and execution-dispatch layer:
//! answers and tool results are memoized with bounded lifetime, I/O-bound
//! work runs on a bounded pool, and CPU-bound arithmetic runs on dedicated
//! worker threads behind a memo table.

pub mod agent;
pub mod api;
pub mod backends;
pub mod cache;
pub mod config;
pub mod error;
pub mod eval;
pub mod exec;
pub mod gateway;
pub mod models;
pub mod tasks;
pub mod tools;

pub use api::AppState;
pub use config::Config;
pub use gateway::AnswerGateway;
pub use tasks::spawn_cleanup_task;
