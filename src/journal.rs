//! Append-only log of published posts.
//!
//! The log file is the system of record: created with a header row if
//! absent, then only ever appended to. Rows are CSV so captions containing
//! commas, quotes or hashtags survive a round trip.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::BotError;

/// One successfully published post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostRecord {
    /// When the post was published
    pub timestamp: DateTime<Utc>,
    /// Public URL of the hosted image
    pub image_url: String,
    /// Caption text as published
    pub caption: String,
}

/// Handle to the append-only post log file.
#[derive(Debug, Clone)]
pub struct PostJournal {
    path: PathBuf,
}

impl PostJournal {
    /// Opens the journal, creating the file with its header row if it does
    /// not exist yet. The header is written exactly once, at creation.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, BotError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        if !path.exists() {
            let mut writer = csv::Writer::from_writer(File::create(&path)?);
            writer.write_record(["timestamp", "image_url", "caption"])?;
            writer.flush()?;
        }
        Ok(Self { path })
    }

    /// Appends one record. Existing rows are never touched.
    pub fn append(&self, record: &PostRecord) -> Result<(), BotError> {
        let file = OpenOptions::new().append(true).open(&self.path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        writer.serialize(record)?;
        writer.flush()?;
        Ok(())
    }

    /// Reads every data row back, in append order.
    pub fn read_all(&self) -> Result<Vec<PostRecord>, BotError> {
        let mut reader = csv::Reader::from_path(&self.path)?;
        let mut records = Vec::new();
        for row in reader.deserialize() {
            records.push(row?);
        }
        Ok(records)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
