// src/services/feedback.rs

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::config::FeedbackConfig;

const ANTHROPIC_VERSION: &str = "2023-06-01";

#[derive(Debug)]
pub enum FeedbackError {
    /// No API key configured.
    Disabled,
    Request(reqwest::Error),
    HttpStatus(StatusCode),
    EmptyResponse,
}

impl fmt::Display for FeedbackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedbackError::Disabled => write!(f, "feedback service is not configured"),
            FeedbackError::Request(e) => write!(f, "feedback request failed: {}", e),
            FeedbackError::HttpStatus(s) => write!(f, "feedback service returned {}", s),
            FeedbackError::EmptyResponse => write!(f, "feedback service returned no text"),
        }
    }
}

impl std::error::Error for FeedbackError {}

impl From<reqwest::Error> for FeedbackError {
    fn from(err: reqwest::Error) -> Self {
        FeedbackError::Request(err)
    }
}

/// External text-generation collaborator: prompt in, prose out.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, FeedbackError>;
}

/// Client for an Anthropic-style `/v1/messages` endpoint.
#[derive(Clone)]
pub struct MessagesClient {
    client: Client,
    config: FeedbackConfig,
}

impl MessagesClient {
    pub fn new(config: FeedbackConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub fn enabled(&self) -> bool {
        self.config.api_key.is_some()
    }
}

#[async_trait]
impl TextGenerator for MessagesClient {
    async fn generate(&self, prompt: &str) -> Result<String, FeedbackError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(FeedbackError::Disabled)?;

        let payload = MessagesRequest {
            model: &self.config.model,
            max_tokens: self.config.max_tokens,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(self.config.api_url.clone())
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .timeout(self.config.timeout)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FeedbackError::HttpStatus(response.status()));
        }

        let body: MessagesResponse = response.json().await?;
        let text = body
            .content
            .into_iter()
            .find_map(|block| block.text)
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or(FeedbackError::EmptyResponse)?;

        Ok(text)
    }
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<Message<'a>>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    text: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackSource {
    Generated,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedbackReply {
    pub source: FeedbackSource,
    pub text: String,
}

/// Wraps a [`TextGenerator`] so callers always get text back.
#[derive(Clone)]
pub struct FeedbackService {
    generator: Arc<dyn TextGenerator>,
}

impl FeedbackService {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    pub fn from_config(config: FeedbackConfig) -> Self {
        let client = MessagesClient::new(config);
        if !client.enabled() {
            tracing::info!("FEEDBACK_API_KEY not set, feedback will use local fallback text");
        }
        Self::new(Arc::new(client))
    }

    /// Asks the generator for `prompt`; any failure yields `fallback()` instead.
    pub async fn respond<F>(&self, prompt: &str, fallback: F) -> FeedbackReply
    where
        F: FnOnce() -> String,
    {
        match self.generator.generate(prompt).await {
            Ok(text) => FeedbackReply {
                source: FeedbackSource::Generated,
                text,
            },
            Err(e) => {
                tracing::warn!("Feedback generation failed, using fallback: {}", e);
                FeedbackReply {
                    source: FeedbackSource::Fallback,
                    text: fallback(),
                }
            }
        }
    }
}
