//! Autogram is a scheduled AI content-posting bot with a companion chat
//! relay.
//!
//! # Overview
//! The posting pipeline synthesizes an image prompt from fixed category
//! lists, generates an image and a caption through external AI services,
//! uploads the image to a media host and publishes it to a social account,
//! recording each post in an append-only log. The relay exposes a single
//! HTTP endpoint that forwards a chat message to the text-generation
//! service and returns its reply.
//!
//! # Architecture
//! The crate is organized into modules that handle different aspects of a
//! posting run:

/// Local storage for generated image assets
pub mod assets;

/// Process configuration loaded from the environment
pub mod config;

/// Error types and handling
pub mod error;

/// Append-only log of published posts
pub mod journal;

/// The publish pipeline driver and its retry policy
pub mod pipeline;

/// Prompt synthesis from fixed category lists
pub mod prompt;

/// Clients for the external AI, media-hosting and social services
pub mod providers;

#[cfg(feature = "api")]
pub mod api;

// Re-export for convenience
pub use async_trait::async_trait;

#[inline]
/// Initialize logging using env_logger if the "logging" feature is enabled.
/// This is a no-op if the feature is not enabled.
pub fn init_logging() {
    #[cfg(feature = "logging")]
    {
        let _ = env_logger::try_init();
    }
}
