// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! File-backed token store.
//!
//! Holds exactly one [`TokenRecord`]. Writes replace the whole file and
//! there is no locking, so concurrent callbacks are last-writer-wins.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::StoreError;
use crate::models::TokenRecord;

/// Reads and writes the token record at an injected path.
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persist the record, replacing any previous content.
    pub async fn save(&self, record: &TokenRecord) -> Result<(), StoreError> {
        let json = serde_json::to_string(record)?;
        tokio::fs::write(&self.path, json).await?;
        tracing::info!(path = %self.path.display(), "Access token saved");
        Ok(())
    }

    /// Load the record.
    ///
    /// Returns `None` when the file does not exist yet and also when it
    /// cannot be read or parsed; the latter is logged, never surfaced.
    pub async fn load(&self) -> Option<TokenRecord> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::info!(path = %self.path.display(), "Token file has not been generated yet");
                return None;
            }
            Err(e) => {
                tracing::error!(path = %self.path.display(), error = %e, "Error reading token file");
                return None;
            }
        };

        match serde_json::from_str(&contents) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::error!(path = %self.path.display(), error = %e, "Error parsing token file");
                None
            }
        }
    }
}
