//! Clients for the external services the pipeline calls, behind the traits
//! the pipeline is tested against.

pub mod imgbb;
pub mod instagram;
pub mod openai;

pub use imgbb::ImgbbHost;
pub use instagram::InstagramApi;
pub use openai::{OpenAiImage, OpenAiText};

use std::path::Path;

use async_trait::async_trait;

use crate::error::BotError;

/// Text generation: captions for the posting bot, replies for the relay.
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Sends a prompt to the text-generation service and returns the trimmed
    /// reply text.
    async fn complete(&self, prompt: &str) -> Result<String, BotError>;
}

/// Image generation from a text prompt.
#[async_trait]
pub trait ImageProvider: Send + Sync {
    /// Generates an image for the prompt and returns the decoded bytes.
    async fn generate(&self, prompt: &str) -> Result<Vec<u8>, BotError>;
}

/// Media hosting: turns a local image file into a publicly resolvable URL.
#[async_trait]
pub trait MediaHost: Send + Sync {
    async fn upload(&self, path: &Path) -> Result<String, BotError>;
}

/// Social publishing of a hosted image with a caption.
#[async_trait]
pub trait SocialNetwork: Send + Sync {
    /// Publishes the image and returns the final post identifier.
    async fn publish_photo(&self, image_url: &str, caption: &str) -> Result<String, BotError>;
}
