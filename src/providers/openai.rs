//! OpenAI API clients for text completion and image generation.
//!
//! `OpenAiText` backs both the caption step of the posting pipeline and the
//! chat relay; `OpenAiImage` backs the asset-generation step.

use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::BotError;
use crate::providers::{ImageProvider, TextProvider};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_TEXT_MODEL: &str = "gpt-4.1-mini";
const DEFAULT_IMAGE_MODEL: &str = "dall-e-3";
const DEFAULT_IMAGE_SIZE: &str = "1024x1024";

/// Client for OpenAI's chat completions endpoint.
#[derive(Debug)]
pub struct OpenAiText {
    pub api_key: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout_seconds: Option<u64>,
    base_url: String,
    client: Client,
}

/// Request payload for the chat completions endpoint.
#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatCompletionMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Serialize)]
struct ChatCompletionMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

impl OpenAiText {
    /// Creates a new text client with the specified configuration.
    ///
    /// # Arguments
    ///
    /// * `api_key` - OpenAI API key for authentication
    /// * `model` - Model identifier (defaults to "gpt-4.1-mini")
    /// * `max_tokens` - Output budget in tokens (defaults to 300)
    /// * `temperature` - Sampling temperature (defaults to 0.7)
    /// * `timeout_seconds` - Request timeout in seconds
    /// * `base_url` - Override for the API base URL
    pub fn new(
        api_key: impl Into<String>,
        model: Option<String>,
        max_tokens: Option<u32>,
        temperature: Option<f32>,
        timeout_seconds: Option<u64>,
        base_url: Option<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.unwrap_or_else(|| DEFAULT_TEXT_MODEL.to_string()),
            max_tokens: max_tokens.unwrap_or(300),
            temperature: temperature.unwrap_or(0.7),
            timeout_seconds,
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            client: Client::new(),
        }
    }
}

#[async_trait]
impl TextProvider for OpenAiText {
    async fn complete(&self, prompt: &str) -> Result<String, BotError> {
        if self.api_key.is_empty() {
            return Err(BotError::AuthError("Missing OpenAI API key".to_string()));
        }

        let body = ChatCompletionRequest {
            model: &self.model,
            messages: vec![ChatCompletionMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens: Some(self.max_tokens),
            temperature: Some(self.temperature),
        };

        let url = format!("{}/chat/completions", self.base_url);
        let mut req = self.client.post(url).bearer_auth(&self.api_key).json(&body);
        if let Some(t) = self.timeout_seconds {
            req = req.timeout(Duration::from_secs(t));
        }

        let resp = req.send().await?.error_for_status()?;
        let text = resp.text().await?;
        let parsed: ChatCompletionResponse =
            serde_json::from_str(&text).map_err(|e| BotError::ResponseFormatError {
                message: e.to_string(),
                raw_response: text.clone(),
            })?;

        let reply = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| BotError::ProviderError(
                "No completion choices returned by OpenAI".to_string(),
            ))?;

        Ok(reply.trim().to_string())
    }
}

/// Client for OpenAI's image generation endpoint.
#[derive(Debug)]
pub struct OpenAiImage {
    pub api_key: String,
    pub model: String,
    /// Target resolution, e.g. "1024x1024"
    pub size: String,
    pub timeout_seconds: Option<u64>,
    base_url: String,
    client: Client,
}

/// Request payload for the image generation endpoint.
#[derive(Serialize)]
struct ImageGenerationRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    n: u32,
    size: &'a str,
    response_format: &'a str,
}

#[derive(Deserialize)]
struct ImageGenerationResponse {
    data: Vec<ImageDatum>,
}

#[derive(Deserialize)]
struct ImageDatum {
    b64_json: Option<String>,
}

impl OpenAiImage {
    /// Creates a new image client with the specified configuration.
    pub fn new(
        api_key: impl Into<String>,
        model: Option<String>,
        size: Option<String>,
        timeout_seconds: Option<u64>,
        base_url: Option<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.unwrap_or_else(|| DEFAULT_IMAGE_MODEL.to_string()),
            size: size.unwrap_or_else(|| DEFAULT_IMAGE_SIZE.to_string()),
            timeout_seconds,
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            client: Client::new(),
        }
    }
}

#[async_trait]
impl ImageProvider for OpenAiImage {
    async fn generate(&self, prompt: &str) -> Result<Vec<u8>, BotError> {
        if self.api_key.is_empty() {
            return Err(BotError::AuthError("Missing OpenAI API key".to_string()));
        }

        let body = ImageGenerationRequest {
            model: &self.model,
            prompt,
            n: 1,
            size: &self.size,
            response_format: "b64_json",
        };

        let url = format!("{}/images/generations", self.base_url);
        let mut req = self.client.post(url).bearer_auth(&self.api_key).json(&body);
        if let Some(t) = self.timeout_seconds {
            req = req.timeout(Duration::from_secs(t));
        }

        let resp = req.send().await?.error_for_status()?;
        let text = resp.text().await?;
        let parsed: ImageGenerationResponse =
            serde_json::from_str(&text).map_err(|e| BotError::ResponseFormatError {
                message: e.to_string(),
                raw_response: text.clone(),
            })?;

        let encoded = parsed
            .data
            .into_iter()
            .next()
            .and_then(|d| d.b64_json)
            .ok_or_else(|| BotError::ResponseFormatError {
                message: "image payload missing from response".to_string(),
                raw_response: text,
            })?;

        BASE64
            .decode(encoded.as_bytes())
            .map_err(|e| BotError::ProviderError(format!("image payload was not valid base64: {e}")))
    }
}
