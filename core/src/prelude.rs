use crate::report::{DetectionReport, FileHandle};

/// Common error type for report production, validation, and rendering.
#[derive(thiserror::Error, Debug)]
pub enum ReportError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("malformed report: {0}")]
    MalformedReport(String),
    #[error("invalid layout: {0}")]
    InvalidLayout(String),
    #[error("preview registry exhausted: {0}")]
    PreviewExhausted(String),
    #[error("render failure: {0}")]
    Render(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type ReportResult<T> = Result<T, ReportError>;

/// Capability that turns an uploaded file into a detection report.
///
/// Implementations never fail: every accepted file yields a report. The
/// renderer and session layer only depend on this trait, so a real scoring
/// pipeline can replace the placeholder without touching them.
pub trait ResultProducer: Send + Sync {
    fn produce(&self, file: &FileHandle) -> DetectionReport;
}
