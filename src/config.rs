//! Process configuration, loaded once from the environment at startup and
//! passed by reference thereafter.
//!
//! Missing credentials are not rejected here: they load as empty strings and
//! surface as authentication failures from the client that needs them.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::pipeline::RetryPolicy;

const DEFAULT_POST_INTERVAL: Duration = Duration::from_secs(3 * 60 * 60);
const DEFAULT_RELAY_PORT: u16 = 5000;

/// Configuration for the posting bot.
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub openai_api_key: String,
    /// Override for the OpenAI API base URL
    pub openai_base_url: Option<String>,
    pub text_model: Option<String>,
    pub image_model: Option<String>,
    pub image_size: Option<String>,
    pub imgbb_api_key: String,
    pub instagram_user_id: String,
    pub instagram_access_token: String,
    /// Directory generated images are written to
    pub asset_dir: PathBuf,
    /// Location of the append-only post log
    pub journal_path: PathBuf,
    /// Pause between scheduled posting runs
    pub post_interval: Duration,
    pub retry: RetryPolicy,
}

impl BotConfig {
    /// Reads the bot configuration from the environment.
    pub fn from_env() -> Self {
        Self {
            openai_api_key: env::var("OPENAI_API_KEY").unwrap_or_default(),
            openai_base_url: env::var("OPENAI_BASE_URL").ok(),
            text_model: env::var("AUTOGRAM_TEXT_MODEL").ok(),
            image_model: env::var("AUTOGRAM_IMAGE_MODEL").ok(),
            image_size: env::var("AUTOGRAM_IMAGE_SIZE").ok(),
            imgbb_api_key: env::var("IMGBB_API_KEY").unwrap_or_default(),
            instagram_user_id: env::var("INSTAGRAM_USER_ID").unwrap_or_default(),
            instagram_access_token: env::var("INSTAGRAM_ACCESS_TOKEN").unwrap_or_default(),
            asset_dir: env::var("AUTOGRAM_ASSET_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("generated")),
            journal_path: env::var("AUTOGRAM_JOURNAL")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("post_log.csv")),
            post_interval: env::var("AUTOGRAM_POST_INTERVAL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_POST_INTERVAL),
            retry: RetryPolicy::defaults(),
        }
    }
}

/// Configuration for the chat relay.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub openai_api_key: String,
    pub openai_base_url: Option<String>,
    pub model: Option<String>,
    pub port: u16,
}

impl RelayConfig {
    /// Reads the relay configuration from the environment.
    pub fn from_env() -> Self {
        Self {
            openai_api_key: env::var("OPENAI_API_KEY").unwrap_or_default(),
            openai_base_url: env::var("OPENAI_BASE_URL").ok(),
            model: env::var("AUTOGRAM_TEXT_MODEL").ok(),
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_RELAY_PORT),
        }
    }
}
