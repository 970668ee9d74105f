use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Missing identifier: {0}")]
    MissingId(&'static str),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },
}

impl ApiError {
    /// True when the call was rejected before any request went out
    pub fn is_missing_id(&self) -> bool {
        matches!(self, ApiError::MissingId(_))
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
