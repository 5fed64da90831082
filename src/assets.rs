//! Local storage for generated image assets.
//!
//! Assets are written once under a dedicated directory and never deleted;
//! each run supersedes the previous run's file. File names are derived from
//! a freshly generated UUID so two runs can never collide.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::BotError;

/// A generated image persisted to local storage, owned by the pipeline run
/// that created it until handed to the publisher.
#[derive(Debug, Clone)]
pub struct GeneratedAsset {
    /// Location of the image file on disk
    pub path: PathBuf,
    /// The prompt string the image was generated from
    pub prompt: String,
    /// When the asset was written
    pub created_at: DateTime<Utc>,
}

/// Write-only directory of generated image files.
#[derive(Debug, Clone)]
pub struct AssetStore {
    dir: PathBuf,
}

impl AssetStore {
    /// Opens the store, creating the asset directory if it does not exist.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, BotError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Persists an image payload under a unique file name and returns the
    /// asset handle for the publisher.
    pub fn save(&self, bytes: &[u8], prompt: &str) -> Result<GeneratedAsset, BotError> {
        let path = self.dir.join(format!("{}.png", Uuid::new_v4()));
        fs::write(&path, bytes)?;
        Ok(GeneratedAsset {
            path,
            prompt: prompt.to_string(),
            created_at: Utc::now(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_writes_payload_to_disk() {
        let tmp = tempfile::tempdir().unwrap();
        let store = AssetStore::new(tmp.path().join("assets")).unwrap();

        let asset = store.save(b"not really a png", "a test prompt").unwrap();

        assert_eq!(fs::read(&asset.path).unwrap(), b"not really a png");
        assert_eq!(asset.prompt, "a test prompt");
        assert_eq!(asset.path.extension().unwrap(), "png");
    }

    #[test]
    fn consecutive_saves_never_share_a_path() {
        let tmp = tempfile::tempdir().unwrap();
        let store = AssetStore::new(tmp.path()).unwrap();

        let first = store.save(b"one", "p").unwrap();
        let second = store.save(b"two", "p").unwrap();

        assert_ne!(first.path, second.path);
        assert_eq!(fs::read(&first.path).unwrap(), b"one");
        assert_eq!(fs::read(&second.path).unwrap(), b"two");
    }
}
