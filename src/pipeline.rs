//! The publish pipeline: generate, caption, publish, log, inside a bounded
//! retry loop.
//!
//! Each attempt restarts from a freshly synthesized prompt. Transient
//! failures retry with a fixed backoff up to the attempt ceiling; permanent
//! errors like a rejected credential fail the run immediately.

use std::fmt;
use std::time::Duration;

use chrono::Utc;
use tokio::time::sleep;

use crate::assets::AssetStore;
use crate::error::BotError;
use crate::journal::{PostJournal, PostRecord};
use crate::prompt::PromptLibrary;
use crate::providers::{ImageProvider, MediaHost, SocialNetwork, TextProvider};

/// Stage of a single pipeline attempt, named in the diagnostic emitted when
/// the attempt fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Generating,
    Captioning,
    Publishing,
    Logging,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Generating => write!(f, "generating"),
            Stage::Captioning => write!(f, "captioning"),
            Stage::Publishing => write!(f, "publishing"),
            Stage::Logging => write!(f, "logging"),
        }
    }
}

/// Configuration for retry and backoff behavior.
#[derive(Clone, Debug)]
pub struct RetryPolicy {
    /// Maximum number of attempts including the first one
    pub max_attempts: usize,
    /// Fixed pause between failed attempts
    pub backoff: Duration,
}

impl RetryPolicy {
    /// Creates the default policy: three attempts, thirty seconds apart.
    pub fn defaults() -> Self {
        Self {
            max_attempts: 3,
            backoff: Duration::from_secs(30),
        }
    }
}

/// Wraps the rendered prompt in the caption instruction before the text
/// service is called.
fn caption_prompt(rendered: &str) -> String {
    format!(
        "Write a short, engaging caption for this image: {rendered} \
         End with exactly 8 hashtags covering nature, landscapes, photography, \
         travel, adventure, mood, art and earth."
    )
}

/// One end-to-end posting run: generate an image, write a caption, publish,
/// append to the journal.
pub struct PublishPipeline<'a> {
    prompts: &'a PromptLibrary,
    image: &'a dyn ImageProvider,
    text: &'a dyn TextProvider,
    media: &'a dyn MediaHost,
    social: &'a dyn SocialNetwork,
    assets: &'a AssetStore,
    journal: &'a PostJournal,
    retry: RetryPolicy,
}

impl<'a> PublishPipeline<'a> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        prompts: &'a PromptLibrary,
        image: &'a dyn ImageProvider,
        text: &'a dyn TextProvider,
        media: &'a dyn MediaHost,
        social: &'a dyn SocialNetwork,
        assets: &'a AssetStore,
        journal: &'a PostJournal,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            prompts,
            image,
            text,
            media,
            social,
            assets,
            journal,
            retry,
        }
    }

    /// Runs the pipeline until a post is published or the attempt ceiling is
    /// reached.
    ///
    /// # Returns
    ///
    /// * `Ok(PostRecord)` - The record appended to the journal
    /// * `Err(BotError)` - A permanent failure, or `RetryExceeded` once every
    ///   attempt has been spent on transient ones
    pub async fn run(&self) -> Result<PostRecord, BotError> {
        let mut last_err: Option<BotError> = None;
        for attempt in 1..=self.retry.max_attempts {
            match self.attempt().await {
                Ok(record) => {
                    log::info!(
                        "published {} on attempt {attempt}/{}",
                        record.image_url,
                        self.retry.max_attempts
                    );
                    return Ok(record);
                }
                Err((stage, e)) => {
                    log::warn!(
                        "attempt {attempt}/{} failed while {stage}: {e}",
                        self.retry.max_attempts
                    );
                    if !is_retryable(&e) {
                        return Err(e);
                    }
                    last_err = Some(e);
                    if attempt < self.retry.max_attempts {
                        sleep(self.retry.backoff).await;
                    }
                }
            }
        }
        Err(BotError::RetryExceeded {
            attempts: self.retry.max_attempts,
            last_error: last_err.map(|e| e.to_string()).unwrap_or_default(),
        })
    }

    /// One full pass over the stages, starting from a fresh prompt.
    async fn attempt(&self) -> Result<PostRecord, (Stage, BotError)> {
        let spec = self.prompts.synthesize();
        let rendered = spec.render();
        log::debug!("prompt: {rendered}");

        let bytes = self
            .image
            .generate(&rendered)
            .await
            .map_err(|e| (Stage::Generating, e))?;
        let asset = self
            .assets
            .save(&bytes, &rendered)
            .map_err(|e| (Stage::Generating, e))?;

        let caption = self
            .text
            .complete(&caption_prompt(&rendered))
            .await
            .map_err(|e| (Stage::Captioning, e))?;

        let image_url = self
            .media
            .upload(&asset.path)
            .await
            .map_err(|e| (Stage::Publishing, e))?;
        let post_id = self
            .social
            .publish_photo(&image_url, &caption)
            .await
            .map_err(|e| (Stage::Publishing, e))?;
        log::debug!("created post {post_id}");

        let record = PostRecord {
            timestamp: Utc::now(),
            image_url,
            caption,
        };
        self.journal
            .append(&record)
            .map_err(|e| (Stage::Logging, e))?;
        Ok(record)
    }
}

fn is_retryable(err: &BotError) -> bool {
    match err {
        BotError::HttpError(_) => true,
        BotError::ProviderError(_) => true,
        BotError::ResponseFormatError { .. } => true,
        BotError::JsonError(_) => true,
        BotError::IoError(_) => true,
        BotError::RetryExceeded { .. } => false,
        BotError::AuthError(_) => false,
        BotError::InvalidRequest(_) => false,
    }
}
