//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Tokio worker threads for the request-handling runtime
    pub api_workers: usize,
    /// Concurrent task permits for the I/O-bound pool
    pub io_pool_workers: usize,
    /// Dedicated worker threads for the CPU-bound pool
    pub cpu_pool_workers: usize,
    /// TTL in seconds for cached answers
    pub answer_ttl: u64,
    /// TTL in seconds for cached search results
    pub search_ttl: u64,
    /// Capacity bound for the cache store (None = unbounded)
    pub max_cache_entries: Option<usize>,
    /// Background cleanup task interval in seconds
    pub cleanup_interval: u64,
    /// HTTP server port
    pub server_port: u16,
    /// API credential for the external search backend
    pub tavily_api_key: String,
    /// API credential for the LLM backend
    pub llm_api_key: String,
    /// Model name sent to the LLM backend
    pub llm_model: String,
    /// Base URL of the OpenAI-compatible LLM backend
    pub llm_base_url: String,
}

fn env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `API_WORKERS` - Runtime worker threads (default: available parallelism)
    /// - `IO_POOL_WORKERS` - I/O pool permits (default: 5)
    /// - `CPU_POOL_WORKERS` - CPU pool threads (default: 2)
    /// - `ANSWER_TTL` / `SEARCH_TTL` - Cache TTLs in seconds (default: 300)
    /// - `MAX_CACHE_ENTRIES` - Cache capacity bound, 0 = unbounded (default: 0)
    /// - `CLEANUP_INTERVAL` - Expiry sweep frequency in seconds (default: 30)
    /// - `SERVER_PORT` - HTTP server port (default: 8000)
    /// - `TAVILY_API_KEY` - Search backend credential
    /// - `OPENAI_API_KEY` / `LLM_MODEL` / `LLM_BASE_URL` - LLM backend settings
    pub fn from_env() -> Self {
        let default_workers = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);

        let max_cache_entries = match env_parse::<usize>("MAX_CACHE_ENTRIES", 0) {
            0 => None,
            n => Some(n),
        };

        Self {
            api_workers: env_parse("API_WORKERS", default_workers),
            io_pool_workers: env_parse("IO_POOL_WORKERS", 5),
            cpu_pool_workers: env_parse("CPU_POOL_WORKERS", 2),
            answer_ttl: env_parse("ANSWER_TTL", 300),
            search_ttl: env_parse("SEARCH_TTL", 300),
            max_cache_entries,
            cleanup_interval: env_parse("CLEANUP_INTERVAL", 30),
            server_port: env_parse("SERVER_PORT", 8000),
            tavily_api_key: env::var("TAVILY_API_KEY").unwrap_or_default(),
            llm_api_key: env::var("OPENAI_API_KEY").unwrap_or_default(),
            llm_model: env::var("LLM_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            llm_base_url: env::var("LLM_BASE_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_workers: 1,
            io_pool_workers: 5,
            cpu_pool_workers: 2,
            answer_ttl: 300,
            search_ttl: 300,
            max_cache_entries: None,
            cleanup_interval: 30,
            server_port: 8000,
            tavily_api_key: String::new(),
            llm_api_key: String::new(),
            llm_model: "gpt-4o-mini".to_string(),
            llm_base_url: "https://api.openai.com/v1".to_string(),
        }
    }
}
