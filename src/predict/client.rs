use reqwest::multipart;
use tracing::{debug, warn};

use super::dto::{ApiErrorBody, PredictResponse};
use crate::error::AppError;
use crate::selection::PendingSelection;

/// Client for the external inference endpoint. One request per user gesture;
/// no retry, no timeout, no cancellation beyond what the transport applies.
#[derive(Debug, Clone)]
pub struct PredictClient {
    http: reqwest::Client,
    base_url: String,
}

impl PredictClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Submits the selected image as a multipart `image` field and decodes the
    /// nutrition estimate. Failures collapse to a single displayable message,
    /// preferring the server's `error` detail over the transport message.
    pub async fn predict(&self, selection: &PendingSelection) -> Result<PredictResponse, AppError> {
        let part = multipart::Part::bytes(selection.bytes.to_vec())
            .file_name(selection.file_name.clone())
            .mime_str(&selection.content_type)
            .map_err(|e| AppError::Analysis(e.to_string()))?;
        let form = multipart::Form::new().part("image", part);

        let url = format!("{}/predict", self.base_url);
        debug!(%url, file = %selection.file_name, "submitting image for analysis");

        let response = self
            .http
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| AppError::Analysis(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = match response.json::<ApiErrorBody>().await {
                Ok(body) => body.error,
                Err(_) => format!("server returned {status}"),
            };
            warn!(%status, %detail, "predict request rejected");
            return Err(AppError::Analysis(detail));
        }

        response
            .json::<PredictResponse>()
            .await
            .map_err(|e| AppError::Analysis(e.to_string()))
    }
}
