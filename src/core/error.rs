//! Structured error handling for the text frontend
//!
//! Construction problems (missing vocabulary, bad configuration) are fatal and
//! surface as [`FrontendError::Config`] or [`FrontendError::ModelLoad`]. Per-call
//! failures carry the [`TextOperation`] that produced them. Unknown tokens and
//! sentence-bound overflows are not errors and never appear here.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias with FrontendError
pub type Result<T> = std::result::Result<T, FrontendError>;

/// Main error type for the text frontend
#[derive(Error, Debug, Clone)]
pub enum FrontendError {
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        path: Option<PathBuf>,
    },

    /// Vocabulary / engine loading errors
    #[error("Model loading error in {component}: {message}")]
    ModelLoad {
        message: String,
        component: String,
        path: Option<PathBuf>,
    },

    /// Text processing errors
    #[error("Text processing error ({operation}): {message}")]
    Text {
        message: String,
        operation: TextOperation,
    },

    /// Validation errors
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },
}

impl FrontendError {
    /// Configuration error pointing at a file
    pub fn config(message: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        FrontendError::Config {
            message: message.into(),
            path: Some(path.into()),
        }
    }

    /// Text processing error for the given operation
    pub fn text(operation: TextOperation, message: impl Into<String>) -> Self {
        FrontendError::Text {
            message: message.into(),
            operation,
        }
    }

    /// Validation error on a named field
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        FrontendError::Validation {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Whether the error happened while constructing a component
    pub fn is_construction_error(&self) -> bool {
        matches!(
            self,
            FrontendError::Config { .. } | FrontendError::ModelLoad { .. }
        )
    }
}

/// Text operation types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextOperation {
    Protection,
    Tokenization,
    Decoding,
}

impl fmt::Display for TextOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextOperation::Protection => write!(f, "span protection"),
            TextOperation::Tokenization => write!(f, "tokenization"),
            TextOperation::Decoding => write!(f, "decoding"),
        }
    }
}

/// Convert from serde_yaml::Error
impl From<serde_yaml::Error> for FrontendError {
    fn from(err: serde_yaml::Error) -> Self {
        FrontendError::Config {
            message: format!("Failed to parse config YAML: {}", err),
            path: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FrontendError::config("Vocabulary file not found", "checkpoints/bpe.model");
        assert!(err.to_string().contains("Configuration error"));
        assert!(err.to_string().contains("Vocabulary file not found"));
        assert!(err.is_construction_error());
    }

    #[test]
    fn test_text_operation_display() {
        assert_eq!(TextOperation::Protection.to_string(), "span protection");
        let err = FrontendError::text(TextOperation::Tokenization, "engine failure");
        assert_eq!(
            err.to_string(),
            "Text processing error (tokenization): engine failure"
        );
        assert!(!err.is_construction_error());
    }

    #[test]
    fn test_yaml_error_is_config_error() {
        let yaml_err = serde_yaml::from_str::<Vec<u32>>("[1, oops").unwrap_err();
        let err = FrontendError::from(yaml_err);
        assert!(matches!(err, FrontendError::Config { path: None, .. }));
        assert!(err.to_string().starts_with("Configuration error: Failed to parse config YAML"));
    }

}
