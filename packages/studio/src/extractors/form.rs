use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::{FromRequest, Multipart, Request};

use crate::error::AppError;

/// A file part of a multipart submission.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub bytes: Bytes,
}

/// A multipart admin form, read fully into text fields and files.
///
/// File inputs submitted without a file (empty filename) are dropped.
#[derive(Debug, Default)]
pub struct AdminForm {
    fields: HashMap<String, String>,
    files: HashMap<String, UploadedFile>,
}

impl AdminForm {
    #[cfg(test)]
    pub fn with_field(mut self, name: &str, value: &str) -> Self {
        self.fields.insert(name.to_string(), value.to_string());
        self
    }

    #[cfg(test)]
    pub fn with_file(mut self, name: &str, file_name: &str, bytes: &'static [u8]) -> Self {
        self.files.insert(
            name.to_string(),
            UploadedFile {
                file_name: file_name.to_string(),
                bytes: Bytes::from_static(bytes),
            },
        );
        self
    }

    pub fn has(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn take_file(&mut self, name: &str) -> Option<UploadedFile> {
        self.files.remove(name)
    }
}

impl<S> FromRequest<S> for AdminForm
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| AppError::Validation(e.body_text()))?;

        let mut form = AdminForm::default();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::Validation(format!("Multipart error: {e}")))?
        {
            let Some(name) = field.name().map(str::to_owned) else {
                continue;
            };
            match field.file_name().map(str::to_owned) {
                Some(file_name) => {
                    let bytes = field
                        .bytes()
                        .await
                        .map_err(|e| AppError::Validation(format!("Upload read error: {e}")))?;
                    if !file_name.trim().is_empty() {
                        form.files.insert(name, UploadedFile { file_name, bytes });
                    }
                }
                None => {
                    let text = field.text().await.map_err(|e| {
                        AppError::Validation(format!("Failed to read field '{name}': {e}"))
                    })?;
                    form.fields.insert(name, text);
                }
            }
        }

        Ok(form)
    }
}
