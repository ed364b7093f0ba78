//! LLM Backend Module
//!
//! Text completion against an OpenAI-compatible chat endpoint, behind a
//! trait boundary like the search backend.

use anyhow::{anyhow, Context};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

// == LLM Backend Trait ==
/// A text completion service.
#[async_trait]
pub trait LlmBackend: Send + Sync {
    /// Sends `prompt` and returns the model's text response.
    async fn complete(&self, prompt: &str) -> std::result::Result<String, String>;
}

// == OpenAI-Compatible Client ==
/// Chat-completions client for any OpenAI-compatible API.
pub struct OpenAiCompletion {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}

impl OpenAiCompletion {
    /// Creates a client for the given endpoint, credential, and model.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: base_url.into(),
        }
    }

    async fn request(&self, prompt: &str) -> anyhow::Result<String> {
        let body = json!({
            "model": self.model,
            "messages": [{"role": "user", "content": prompt}],
        });

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .context("completion request failed")?
            .error_for_status()
            .context("completion request rejected")?;

        let parsed: ChatResponse = response
            .json()
            .await
            .context("malformed completion response")?;
        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| anyhow!("completion response contained no choices"))
    }
}

#[async_trait]
impl LlmBackend for OpenAiCompletion {
    async fn complete(&self, prompt: &str) -> std::result::Result<String, String> {
        self.request(prompt).await.map_err(|e| e.to_string())
    }
}
