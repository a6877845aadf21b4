//! Test-case generation via a chat-completion endpoint
//!
//! Builds a fixed prompt from a Story's summary and description, sends it as
//! a single user message and returns the trimmed text of the first choice.
//! The returned text is not validated; it is treated as opaque.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::config::OpenAiConfig;
use crate::error::{AppError, AppResult};

/// Produces test-case text for a Story
#[async_trait]
pub trait TestCaseGenerator: Send + Sync {
    async fn generate(&self, summary: &str, description: &str) -> AppResult<String>;
}

/// Prompt embedding the Story text verbatim
pub fn build_prompt(summary: &str, description: &str) -> String {
    format!(
        "Generate detailed test cases for the following Jira story:\n\n\
         Summary: {}\n\
         Description: {}\n\n\
         Format them in Gherkin style.",
        summary, description
    )
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// OpenAI-compatible chat-completion client
pub struct OpenAiGenerator {
    client: reqwest::Client,
    endpoint: String,
    api_key: SecretString,
    model: String,
}

impl OpenAiGenerator {
    /// Create a generator from configuration
    pub fn new(config: &OpenAiConfig) -> AppResult<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| AppError::Internal("Missing OpenAI API key".to_string()))?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: format!("{}/chat/completions", config.base_url.trim_end_matches('/')),
            api_key,
            model: config.model.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl TestCaseGenerator for OpenAiGenerator {
    async fn generate(&self, summary: &str, description: &str) -> AppResult<String> {
        let prompt = build_prompt(summary, description);
        let request = ChatRequest {
            model: &self.model,
            messages: [ChatMessage {
                role: "user",
                content: &prompt,
            }],
        };

        tracing::debug!(model = %self.model, prompt_len = prompt.len(), "Requesting test cases");

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(self.api_key.expose_secret())
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::Generation(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(AppError::Generation(format!(
                "API error ({}): {}",
                status, text
            )));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| AppError::Generation(format!("Failed to parse JSON: {}", e)))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| AppError::Generation("Response contained no choices".to_string()))?;

        Ok(content.trim().to_string())
    }
}
