//! Instagram Graph API client implementing the two-phase publish protocol.
//!
//! Publishing is create-then-publish: a media container is created for the
//! hosted image, then the container is published. A container whose publish
//! call fails is abandoned; the Graph API expires it server-side.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::error::BotError;
use crate::providers::SocialNetwork;

const DEFAULT_BASE_URL: &str = "https://graph.facebook.com/v19.0";

/// Client for an Instagram business account.
#[derive(Debug)]
pub struct InstagramApi {
    pub user_id: String,
    pub access_token: String,
    pub timeout_seconds: Option<u64>,
    base_url: String,
    client: Client,
}

/// Both phases answer with a bare identifier object.
#[derive(Deserialize)]
struct GraphIdResponse {
    id: Option<String>,
}

impl InstagramApi {
    /// Creates a new client for the given account.
    ///
    /// # Arguments
    ///
    /// * `user_id` - Instagram business account identifier
    /// * `access_token` - Graph API access token
    /// * `base_url` - Override for the Graph API base URL
    /// * `timeout_seconds` - Request timeout in seconds
    pub fn new(
        user_id: impl Into<String>,
        access_token: impl Into<String>,
        base_url: Option<String>,
        timeout_seconds: Option<u64>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            access_token: access_token.into(),
            timeout_seconds,
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            client: Client::new(),
        }
    }

    /// Phase one: creates a media container for the hosted image and returns
    /// the creation identifier required to publish it.
    pub async fn create_container(
        &self,
        image_url: &str,
        caption: &str,
    ) -> Result<String, BotError> {
        if self.access_token.is_empty() {
            return Err(BotError::AuthError(
                "Missing Instagram access token".to_string(),
            ));
        }

        let url = format!("{}/{}/media", self.base_url, self.user_id);
        let params = [
            ("image_url", image_url),
            ("caption", caption),
            ("access_token", self.access_token.as_str()),
        ];
        self.post_for_id(&url, &params, "creation id missing from media container response")
            .await
    }

    /// Phase two: publishes a previously created container and returns the
    /// final post identifier.
    pub async fn publish_container(&self, creation_id: &str) -> Result<String, BotError> {
        let url = format!("{}/{}/media_publish", self.base_url, self.user_id);
        let params = [
            ("creation_id", creation_id),
            ("access_token", self.access_token.as_str()),
        ];
        self.post_for_id(&url, &params, "post id missing from publish response")
            .await
    }

    async fn post_for_id(
        &self,
        url: &str,
        params: &[(&str, &str)],
        missing: &str,
    ) -> Result<String, BotError> {
        let mut req = self.client.post(url).form(params);
        if let Some(t) = self.timeout_seconds {
            req = req.timeout(Duration::from_secs(t));
        }

        let resp = req.send().await?.error_for_status()?;
        let text = resp.text().await?;
        let parsed: GraphIdResponse =
            serde_json::from_str(&text).map_err(|e| BotError::ResponseFormatError {
                message: e.to_string(),
                raw_response: text.clone(),
            })?;

        parsed.id.ok_or_else(|| BotError::ResponseFormatError {
            message: missing.to_string(),
            raw_response: text,
        })
    }
}

#[async_trait]
impl SocialNetwork for InstagramApi {
    async fn publish_photo(&self, image_url: &str, caption: &str) -> Result<String, BotError> {
        let creation_id = self.create_container(image_url, caption).await?;
        self.publish_container(&creation_id).await
    }
}
