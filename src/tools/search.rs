//! Search Tool Module
//!
//! Real-time web search with result caching. On a miss the external call
//! runs on the I/O pool; results are summarized to a fixed budget and cached
//! under the raw query text.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::backends::{SearchBackend, SearchResult};
use crate::cache::SharedCache;
use crate::exec::IoPool;
use crate::tools::Tool;

// == Tuning ==
/// Results requested from the backend.
const MAX_RESULTS: usize = 3;

/// Character budget per result body.
const SNIPPET_CHARS: usize = 200;

/// Returned verbatim when the backend finds nothing.
const NO_RESULTS: &str = "No results found.";

// == Search Tool ==
/// Cache-aside web search over the I/O pool.
pub struct SearchTool {
    cache: SharedCache,
    io: Arc<IoPool>,
    backend: Arc<dyn SearchBackend>,
    ttl_seconds: u64,
}

impl SearchTool {
    pub fn new(
        cache: SharedCache,
        io: Arc<IoPool>,
        backend: Arc<dyn SearchBackend>,
        ttl_seconds: u64,
    ) -> Self {
        Self {
            cache,
            io,
            backend,
            ttl_seconds,
        }
    }

    /// Formats backend results as newline-separated summary lines.
    fn format_results(results: &[SearchResult]) -> String {
        if results.is_empty() {
            return NO_RESULTS.to_string();
        }
        results
            .iter()
            .map(|r| {
                let snippet: String = r.content.chars().take(SNIPPET_CHARS).collect();
                format!("- {}: {}...", r.title, snippet)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[async_trait]
impl Tool for SearchTool {
    fn name(&self) -> &str {
        "web_search"
    }

    fn description(&self) -> &str {
        "Perform a real-time web search and return summarized results"
    }

    async fn invoke(&self, query: &str) -> String {
        // Cache key is the raw query text. The hit indicator stays in the
        // logs; callers just see the result string.
        if let Some(cached) = self.cache.write().await.get(query) {
            info!(query, "search cache hit");
            return cached;
        }
        info!(query, "search cache miss");

        let backend = self.backend.clone();
        let owned_query = query.to_string();
        let outcome = self
            .io
            .submit(async move { backend.search(&owned_query, MAX_RESULTS).await })
            .await;

        let output = match outcome {
            Ok(Ok(results)) => Self::format_results(&results),
            Ok(Err(backend_err)) => {
                warn!(query, error = %backend_err, "search backend failed");
                return format!("Search error: {backend_err}");
            }
            Err(pool_err) => {
                warn!(query, error = %pool_err, "search dispatch failed");
                return format!("Search error: {pool_err}");
            }
        };

        self.cache
            .write()
            .await
            .set(query.to_string(), output.clone(), self.ttl_seconds);
        output
    }
}
