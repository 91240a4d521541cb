//! Error types returned across the extraction and inference boundaries.

use thiserror::Error;

/// Why a document produced no text.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// Extension not in the recognized table; no extractor was run
    #[error("unsupported file extension: {extension}")]
    UnsupportedFormat { extension: String },

    /// Opening, parsing, rendering or recognition failed
    #[error("error extracting text: {0}")]
    ExtractionFailure(String),
}

/// Discriminant of [`ExtractError`] for callers that only need to branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    UnsupportedFormat,
    ExtractionFailure,
}

impl ExtractError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ExtractError::UnsupportedFormat { .. } => ErrorKind::UnsupportedFormat,
            ExtractError::ExtractionFailure(_) => ErrorKind::ExtractionFailure,
        }
    }
}

/// Failures talking to the model endpoint.
#[derive(Error, Debug)]
pub enum InferenceError {
    #[error("request to model endpoint failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("model endpoint returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid response from model endpoint: {0}")]
    Decode(#[from] serde_json::Error),
}
