use std::time::Duration;
use thiserror::Error;

/// Failure kinds of a single resolution request.
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("{0}")]
    InvalidRequest(String),

    #[error("Could not extract video info: {0}")]
    ExtractionFailed(String),

    #[error("Extraction timed out after {0:?}")]
    ExtractionTimeout(Duration),

    #[error("Malformed metadata: {0}")]
    MalformedMetadata(#[from] serde_json::Error),

    #[error("No processing URL found")]
    NoUsableStream,

    #[error(transparent)]
    InternalFault(#[from] anyhow::Error),
}
