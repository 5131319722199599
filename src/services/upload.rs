// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Image uploads stored on local disk.
//!
//! Files are named `<unix seconds>_<original name>`. Two uploads of the same
//! name within one second overwrite each other; there is no locking.

use crate::error::AppError;
use std::path::{Path, PathBuf};

/// URL prefix under which uploaded files are served.
pub const URL_PREFIX: &str = "/uploads";

/// Directory-backed store for uploaded images.
#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the upload directory if it does not exist.
    pub async fn ensure_dir(&self) -> std::io::Result<()> {
        tokio::fs::create_dir_all(&self.dir).await
    }

    /// Write `bytes` to disk and return the public URL of the stored file.
    pub async fn save(&self, original_name: &str, bytes: &[u8]) -> Result<String, AppError> {
        let file_name = stored_file_name(chrono::Utc::now().timestamp(), original_name);
        let path = self.dir.join(&file_name);

        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| AppError::Upload(format!("Failed to save {}: {}", path.display(), e)))?;

        tracing::info!(file = %file_name, size = bytes.len(), "Stored upload");

        Ok(format!("{}/{}", URL_PREFIX, file_name))
    }
}

/// On-disk name for an upload. Directory components in the client-supplied
/// name are stripped.
pub fn stored_file_name(unix_secs: i64, original_name: &str) -> String {
    let base = original_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();

    let base = match base {
        "" | "." | ".." => "upload",
        name => name,
    };

    format!("{}_{}", unix_secs, base)
}
