//! Search Backend Module
//!
//! Web search over the Tavily HTTP API, behind a trait so the tool layer
//! never depends on the concrete service.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

// == Search Result ==
/// One result from the search backend.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResult {
    /// Result title
    pub title: String,
    /// Result body text
    pub content: String,
}

// == Search Backend Trait ==
/// A real-time web search service.
///
/// Failures are reported as plain message strings; the calling tool decides
/// how to present them.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Runs `query`, returning at most `max_results` results.
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> std::result::Result<Vec<SearchResult>, String>;
}

// == Tavily Client ==
/// Tavily search API client.
pub struct TavilySearch {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
}

#[derive(Debug, Deserialize)]
struct TavilyResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

impl TavilySearch {
    /// Creates a client with the given API credential.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            endpoint: "https://api.tavily.com/search".to_string(),
        }
    }

    /// Overrides the API endpoint (tests point this at a local server).
    #[allow(dead_code)]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[async_trait]
impl SearchBackend for TavilySearch {
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> std::result::Result<Vec<SearchResult>, String> {
        let body = json!({
            "api_key": self.api_key,
            "query": query,
            "max_results": max_results,
        });

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let response = response.error_for_status().map_err(|e| e.to_string())?;
        let parsed: TavilyResponse = response.json().await.map_err(|e| e.to_string())?;
        Ok(parsed.results)
    }
}
