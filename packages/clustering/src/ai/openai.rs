//! OpenAI implementation of the AI trait.
//!
//! A reference implementation against the chat-completions API. Any
//! OpenAI-compatible endpoint works via `with_base_url`.
//!
//! # Example
//!
//! ```rust,ignore
//! use clustering::ai::OpenAI;
//!
//! let ai = OpenAI::from_env()?.with_model("gpt-4o-mini");
//! let pipeline = Pipeline::new(store, ai);
//! ```

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{ClusterError, Result};
use crate::traits::ai::AI;

/// OpenAI-compatible chat-completions client.
///
/// Requests JSON-object responses at temperature 0 so proposals come
/// back as a single deterministic JSON document.
#[derive(Clone)]
pub struct OpenAI {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl OpenAI {
    /// Create a new client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: "gpt-4o-mini".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
        }
    }

    /// Create from the `OPENAI_API_KEY` environment variable.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| ClusterError::Config("OPENAI_API_KEY not set".into()))?;
        Ok(Self::new(api_key))
    }

    /// Set the chat model (default: gpt-4o-mini).
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set a custom base URL (for Azure, proxies, compatible servers).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Get the current model name.
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    response_format: ResponseFormat,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: String,
}

#[derive(Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChatMessage,
}

#[async_trait]
impl AI for OpenAI {
    async fn complete(&self, system_instructions: &str, user_payload: &str) -> Result<String> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system_instructions.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: user_payload.to_string(),
                },
            ],
            temperature: 0.0,
            response_format: ResponseFormat {
                format_type: "json_object".to_string(),
            },
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| ClusterError::AI(e.to_string().into()))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ClusterError::AI(
                format!("chat completion error: {error_text}").into(),
            ));
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| ClusterError::AI(e.to_string().into()))?;

        chat.choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| ClusterError::AI("no choices in response".into()))
    }
}
