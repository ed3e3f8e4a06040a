use std::path::Path;

use bytes::Bytes;

use crate::error::AppError;

/// A picked food image awaiting submission. Holds the raw bytes plus a
/// transient preview URL; dropped on reset or once a logged meal is confirmed.
#[derive(Debug, Clone)]
pub struct PendingSelection {
    pub file_name: String,
    pub bytes: Bytes,
    pub content_type: String,
    pub preview_url: String,
}

impl PendingSelection {
    /// Reads the file at `path`. Content type is guessed from the extension;
    /// anything unrecognized goes up as `application/octet-stream` and any
    /// rejection is left to the inference endpoint.
    pub fn open(path: &Path) -> Result<Self, AppError> {
        let bytes = std::fs::read(path).map_err(|source| AppError::ImageRead {
            path: path.display().to_string(),
            source,
        })?;

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".into());

        let content_type = mime_guess::from_path(path)
            .first_or_octet_stream()
            .essence_str()
            .to_string();

        let preview_url = format!("file://{}", path.display());

        Ok(Self {
            file_name,
            bytes: Bytes::from(bytes),
            content_type,
            preview_url,
        })
    }
}
