//! Blob store for uploaded images.
//!
//! Stores raw image bytes under a configured directory and hands back the
//! stored filename; the data model only ever carries that filename. Files
//! are served back under the `/uploads` static path.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;

/// Filesystem-backed image store.
#[derive(Debug, Clone)]
pub struct ImageStore {
    dir: PathBuf,
    // Disambiguates uploads landing in the same millisecond
    seq: Arc<AtomicU64>,
}

impl ImageStore {
    /// Create a store rooted at `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns `std::io::Error` if the directory cannot be created.
    pub async fn new(dir: impl Into<PathBuf>) -> Result<Self, std::io::Error> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir).await?;
        Ok(Self {
            dir,
            seq: Arc::new(AtomicU64::new(0)),
        })
    }

    /// Root directory of the store.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Persist uploaded bytes, returning the stored filename.
    ///
    /// The stored name is `{unix_millis}-{seq}{ext}` where `ext` is the
    /// sanitized extension of the client-supplied filename.
    ///
    /// # Errors
    ///
    /// Returns `std::io::Error` if the file cannot be written.
    pub async fn save(
        &self,
        original_name: &str,
        bytes: &[u8],
    ) -> Result<String, std::io::Error> {
        let millis = Utc::now().timestamp_millis();
        let seq = self.seq.fetch_add(1, Ordering::Relaxed);
        let filename = format!("{millis}-{seq}{}", sanitized_extension(original_name));

        tokio::fs::write(self.dir.join(&filename), bytes).await?;
        tracing::debug!(filename, size = bytes.len(), "stored uploaded image");
        Ok(filename)
    }
}

/// Extension of the client filename, restricted to short alphanumeric
/// suffixes; anything else (including path tricks) yields no extension.
fn sanitized_extension(original_name: &str) -> String {
    Path::new(original_name)
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| !e.is_empty() && e.len() <= 8 && e.chars().all(char::is_alphanumeric))
        .map(|e| format!(".{}", e.to_ascii_lowercase()))
        .unwrap_or_default()
}
