use thiserror::Error;

/// Failure taxonomy for the logging workflow. Every variant is recoverable by
/// user retry or a reset; nothing here aborts the process.
#[derive(Debug, Error)]
pub enum AppError {
    /// Submit was requested with no image selected. Reported inline, no
    /// network call is made.
    #[error("Please select an image first")]
    NoImageSelected,

    /// A submission is already in flight for this workflow instance.
    #[error("an analysis request is already in progress")]
    SubmissionInFlight,

    /// Selected file could not be read from disk.
    #[error("failed to read image {path}: {source}")]
    ImageRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Network failure or a non-2xx response from the inference endpoint.
    /// Carries the server-provided `error` detail when present, otherwise the
    /// transport-level failure message.
    #[error("Failed to analyze food image: {0}")]
    Analysis(String),

    /// Meal log could not be written back.
    #[error("failed to persist meal log: {0}")]
    Storage(#[source] anyhow::Error),
}
