use thiserror::Error;

#[derive(Error, Debug)]
pub enum AideError {
    #[error("Invalid {field} '{input}': {reason}")]
    Validation {
        field: &'static str,
        reason: String,
        input: String,
    },

    #[error("{kind} '{key}' already exists")]
    DuplicateKey { kind: &'static str, key: String },

    #[error("{kind} '{key}' not found")]
    NotFound { kind: &'static str, key: String },

    #[error("Unknown command '{keyword}' for {feature}")]
    UnknownCommand { feature: String, keyword: String },

    #[error("Unknown feature: {0}")]
    UnknownFeature(String),

    #[error("Invalid arguments, usage: {usage}")]
    InvalidArguments { usage: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    /// The store's file could not be read, so writing to it is refused.
    #[error("The {kind} store is unavailable: {reason}")]
    Unavailable { kind: &'static str, reason: String },

    #[error("Config error: {0}")]
    Config(String),

    #[error("Logging error: {0}")]
    Logging(String),
}

impl AideError {
    pub fn validation(field: &'static str, reason: impl Into<String>, input: &str) -> Self {
        AideError::Validation {
            field,
            reason: reason.into(),
            input: input.to_string(),
        }
    }

    pub fn not_found(kind: &'static str, key: impl Into<String>) -> Self {
        AideError::NotFound {
            kind,
            key: key.into(),
        }
    }

    pub fn duplicate(kind: &'static str, key: impl Into<String>) -> Self {
        AideError::DuplicateKey {
            kind,
            key: key.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AideError>;
