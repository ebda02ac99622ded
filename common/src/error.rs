use thiserror::Error;

/// Failure of a remote call. Kept as a value next to whatever data was
/// already loaded; it never replaces that data.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(String),
    #[error("request to {url} failed with status {status}")]
    Status { status: u16, url: String },
    #[error("could not decode response: {0}")]
    Decode(String),
}

/// Submitted form data did not match the expected shape.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{path}: expected an object")]
    ExpectedObject { path: String },
    #[error("{path}: missing required key")]
    Missing { path: String },
    #[error("{path}: expected a string, a number or a list of strings")]
    InvalidFieldValue { path: String },
}

impl ValidationError {
    pub fn path(&self) -> &str {
        match self {
            ValidationError::ExpectedObject { path }
            | ValidationError::Missing { path }
            | ValidationError::InvalidFieldValue { path } => path,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid module configuration: {0}")]
    Parse(#[from] serde_json::Error),
}
