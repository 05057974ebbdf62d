use thiserror::Error;

/// Failure of a single city lookup.
///
/// The dropdown treats every variant the same way (log and clear the match
/// list); the variants exist so callers and logs can tell them apart.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("failed to reach the city search endpoint: {0}")]
    Request(#[from] reqwest::Error),

    #[error("city search failed with status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("failed to parse city search response: {0}")]
    Parse(#[from] serde_json::Error),
}
