use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::fs;

use crate::utils::filename::{has_allowed_extension, sanitize_filename};

/// Public URL prefix under which stored uploads are served.
pub const UPLOADS_URL_PREFIX: &str = "/static/uploads";

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("file type not allowed: {0}")]
    DisallowedExtension(String),

    #[error("unusable filename: {0}")]
    InvalidFilename(String),

    #[error("upload IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Image uploads kept in a flat directory, addressed by sanitized filename.
///
/// Two uploads with the same sanitized name overwrite each other.
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    pub async fn new(dir: PathBuf) -> Result<Self, std::io::Error> {
        fs::create_dir_all(&dir).await?;
        fs::create_dir_all(dir.join(".tmp")).await?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Save an image and return the public path recorded on the profile.
    pub async fn store_image(&self, original_name: &str, data: &[u8]) -> Result<String, UploadError> {
        if !has_allowed_extension(original_name) {
            return Err(UploadError::DisallowedExtension(original_name.to_string()));
        }
        let filename = sanitize_filename(original_name)
            .filter(|name| has_allowed_extension(name))
            .ok_or_else(|| UploadError::InvalidFilename(original_name.to_string()))?;

        let temp_path = self
            .dir
            .join(".tmp")
            .join(uuid::Uuid::new_v4().to_string());
        if let Err(e) = fs::write(&temp_path, data).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }
        if let Err(e) = fs::rename(&temp_path, self.dir.join(&filename)).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        tracing::debug!(filename = %filename, size = data.len(), "Stored upload");
        Ok(format!("{UPLOADS_URL_PREFIX}/{filename}"))
    }
}
