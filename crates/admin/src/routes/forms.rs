//! Multipart form reading shared by the upload-accepting routes.

use std::collections::HashMap;

use axum::extract::multipart::{Multipart, MultipartError};

use crate::error::AppError;
use crate::uploads::ImageStore;

/// A fully read multipart body: text fields plus stored filenames for any
/// file parts. File parts are written to the image store as they stream in,
/// so by the time this returns the blobs are already on disk.
#[derive(Debug, Default)]
pub struct FormData {
    text: HashMap<String, String>,
    files: HashMap<String, String>,
}

impl FormData {
    /// Drain a multipart body, persisting file parts through `images`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` for a malformed body and
    /// `AppError::Upload` when a blob cannot be written.
    pub async fn read(mut multipart: Multipart, images: &ImageStore) -> Result<Self, AppError> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await.map_err(bad_multipart)? {
            let Some(name) = field.name().map(ToOwned::to_owned) else {
                continue;
            };

            if let Some(filename) = field.file_name().map(ToOwned::to_owned) {
                let bytes = field.bytes().await.map_err(bad_multipart)?;
                let stored = images.save(&filename, &bytes).await?;
                form.files.insert(name, stored);
            } else {
                form.text.insert(name, field.text().await.map_err(bad_multipart)?);
            }
        }

        Ok(form)
    }

    /// Remove and return a text field.
    pub fn take_text(&mut self, name: &str) -> Option<String> {
        self.text.remove(name)
    }

    /// Remove and return the stored filename of a file field.
    pub fn take_file(&mut self, name: &str) -> Option<String> {
        self.files.remove(name)
    }
}

fn bad_multipart(err: MultipartError) -> AppError {
    AppError::Validation(format!("invalid multipart body: {err}"))
}
