use thiserror::Error;

/// Errors that abort an analysis request before a [`aiready_core::Report`]
/// can be produced. Fetch-level problems are NOT here; they recover into a
/// degraded report via [`FetchFailure`].
#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("invalid URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("reports carry different schema versions ({version_a} vs {version_b}) and cannot be compared")]
    IncompatibleSchemaVersion { version_a: u32, version_b: u32 },
}

/// Fetch failures. Each variant maps to a degraded report with
/// `fetch_ok = false` and zero scores, never an aborted pipeline.
#[derive(Debug, Error)]
pub enum FetchFailure {
    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("host unreachable: {reason}")]
    Unreachable { reason: String },

    #[error("declared body size {content_length} exceeds the cap of {max_bytes} bytes")]
    TooLarge {
        content_length: u64,
        max_bytes: usize,
    },

    #[error("HTTP error status {status}")]
    HttpStatus { status: u16 },

    #[error("redirect limit of {limit} hops exceeded")]
    TooManyRedirects { limit: usize },
}

impl FetchFailure {
    /// The HTTP status carried by the failure, when one was received.
    #[must_use]
    pub fn http_status(&self) -> Option<u16> {
        match self {
            FetchFailure::HttpStatus { status } => Some(*status),
            _ => None,
        }
    }
}
