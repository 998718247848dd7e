use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed json: {0}")]
    Json(#[from] serde_json::Error),
    /// No extraction strategy resolved to an array anywhere in the document.
    /// Distinct from a strategy matching an empty array, which is a valid
    /// empty result.
    #[error("no records found: no extraction strategy matched (tried: {})", tried.join(", "))]
    NoRecords { tried: Vec<String> },
    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ConvertError>;
