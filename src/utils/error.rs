use thiserror::Error;

#[derive(Error, Debug)]
pub enum CardcastError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Deck not found: {code}")]
    NotFound { code: String },

    #[error("Remote service returned unexpected status {status}")]
    UnexpectedStatus { status: u16 },

    #[error("Malformed deck document: {message}")]
    MalformedDocument { message: String },

    #[error("Deck registry error: {message}")]
    RegistryError { message: String },
}

impl CardcastError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
        }
    }

    pub fn not_found(code: impl Into<String>) -> Self {
        Self::NotFound { code: code.into() }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedDocument {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CardcastError>;
