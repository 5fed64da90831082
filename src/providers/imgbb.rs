//! imgbb media-hosting client.
//!
//! Uploads a local image file and returns the publicly resolvable URL the
//! social API fetches the image from.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use reqwest::Client;
use serde::Deserialize;

use crate::error::BotError;
use crate::providers::MediaHost;

const DEFAULT_BASE_URL: &str = "https://api.imgbb.com/1";

/// Client for the imgbb upload endpoint.
#[derive(Debug)]
pub struct ImgbbHost {
    pub api_key: String,
    pub timeout_seconds: Option<u64>,
    base_url: String,
    client: Client,
}

#[derive(Deserialize)]
struct ImgbbResponse {
    data: Option<ImgbbData>,
}

#[derive(Deserialize)]
struct ImgbbData {
    url: Option<String>,
}

impl ImgbbHost {
    /// Creates a new imgbb client.
    ///
    /// # Arguments
    ///
    /// * `api_key` - imgbb API key for authentication
    /// * `base_url` - Override for the API base URL
    /// * `timeout_seconds` - Request timeout in seconds
    pub fn new(
        api_key: impl Into<String>,
        base_url: Option<String>,
        timeout_seconds: Option<u64>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            timeout_seconds,
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            client: Client::new(),
        }
    }
}

#[async_trait]
impl MediaHost for ImgbbHost {
    /// Uploads the file at `path` and returns its public URL.
    ///
    /// Fails with a descriptive error if the response does not carry the
    /// expected URL field.
    async fn upload(&self, path: &Path) -> Result<String, BotError> {
        if self.api_key.is_empty() {
            return Err(BotError::AuthError("Missing imgbb API key".to_string()));
        }

        let bytes = tokio::fs::read(path).await?;
        let form = reqwest::multipart::Form::new().text("image", BASE64.encode(&bytes));

        let url = format!("{}/upload", self.base_url);
        let mut req = self
            .client
            .post(url)
            .query(&[("key", self.api_key.as_str())])
            .multipart(form);
        if let Some(t) = self.timeout_seconds {
            req = req.timeout(Duration::from_secs(t));
        }

        let resp = req.send().await?.error_for_status()?;
        let text = resp.text().await?;
        let parsed: ImgbbResponse =
            serde_json::from_str(&text).map_err(|e| BotError::ResponseFormatError {
                message: e.to_string(),
                raw_response: text.clone(),
            })?;

        parsed
            .data
            .and_then(|d| d.url)
            .ok_or_else(|| BotError::ResponseFormatError {
                message: "public URL missing from upload response".to_string(),
                raw_response: text,
            })
    }
}
