//! Huginn error types

/// Huginn error types
#[derive(Debug, thiserror::Error)]
pub enum HuginnError {
    // Single-attempt network errors
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("request timed out")]
    Timeout,

    // Data errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    // Exhaustion errors
    /// Every attempt of a retried request failed. `source` is the error of
    /// the final attempt.
    #[error("request failed after {attempts} attempts: {source}")]
    RequestExhausted {
        attempts: u32,
        #[source]
        source: Box<HuginnError>,
    },

    /// A single news item could not be loaded.
    #[error("failed to load news item {id}")]
    ItemFetchFailed {
        id: u64,
        #[source]
        source: Box<HuginnError>,
    },

    // In-page delegate API errors
    #[error("delegate API error: {0}")]
    Delegate(String),

    // Configuration errors
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl HuginnError {
    /// The error of the last attempt, unwrapping exhaustion and item
    /// failures down to the underlying network error.
    pub fn root_cause(&self) -> &HuginnError {
        match self {
            HuginnError::RequestExhausted { source, .. }
            | HuginnError::ItemFetchFailed { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

impl From<reqwest::Error> for HuginnError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            HuginnError::Timeout
        } else if let Some(status) = err.status() {
            HuginnError::Api {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else if err.is_decode() {
            HuginnError::InvalidInput(format!("malformed response body: {err}"))
        } else {
            HuginnError::Http(err.to_string())
        }
    }
}

/// Result type alias for Huginn operations
pub type Result<T> = std::result::Result<T, HuginnError>;
