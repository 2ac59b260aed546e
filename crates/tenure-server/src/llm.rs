//! Gateway to the local inference service.
//!
//! One synchronous request/response pair against Ollama's chat endpoint:
//! the rendered briefing rides as the system instruction, the user's
//! message verbatim as the only other turn. Non-streaming.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tenure_core::TenureError;

pub struct OllamaClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    stream: bool,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletion {
    message: CompletionMessage,
}

#[derive(Deserialize)]
struct CompletionMessage {
    content: String,
}

impl OllamaClient {
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        let base_url: String = base_url.into();
        let base_url = base_url.trim_end_matches('/').to_string();
        Ok(Self {
            http,
            base_url,
            model: model.into(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Ask the model one question against the given briefing.
    pub async fn ask(&self, briefing: &str, user_message: &str) -> Result<String, TenureError> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: briefing,
                },
                ChatMessage {
                    role: "user",
                    content: user_message,
                },
            ],
            stream: false,
        };

        let response = self
            .http
            .post(format!("{}/api/chat", self.base_url))
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                TenureError::Upstream(format!(
                    "could not reach the model endpoint at {}: {}. Start it with `ollama serve` and try again.",
                    self.base_url, e
                ))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(TenureError::Upstream(format!(
                "model endpoint returned {}: {}. Check that the model '{}' is available (`ollama pull {}`).",
                status,
                body.trim(),
                self.model,
                self.model
            )));
        }

        let completion: ChatCompletion = response.json().await.map_err(|e| {
            TenureError::Upstream(format!("unexpected response from model endpoint: {}", e))
        })?;

        Ok(completion.message.content)
    }
}
