use thiserror::Error;

/// Everything that can go wrong talking to the registry. The API client
/// converts every failure into one of these variants; nothing panics across
/// that boundary.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected status {0}")]
    Status(reqwest::StatusCode),
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// True when the registry rejected the credentials rather than failing
    /// outright.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Status(status) if *status == reqwest::StatusCode::UNAUTHORIZED)
    }
}
