//! Error types for speech synthesis.

pub mod unified;

pub use unified::{DecodedError, ErrorCategory, ErrorFault};

use thiserror::Error;

/// Primary error type for all speech operations.
#[derive(Error, Debug)]
pub enum SpeechError {
    #[error("missing {0} in credentials")]
    MissingCredentials(&'static str),

    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("invalid {field}: {value}")]
    InvalidParameter { field: &'static str, value: String },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("{code}: {message}")]
    Vendor {
        code: String,
        message: String,
        fault: ErrorFault,
        status: Option<u16>,
        request_id: Option<String>,
    },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Timeout after {0}ms")]
    Timeout(u64),

    #[error("Transport error: {0}")]
    Transport(Box<dyn std::error::Error + Send + Sync>),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Audio stream error: {0}")]
    StreamRead(String),
}

impl SpeechError {
    /// Create a vendor error without HTTP context.
    pub fn vendor(code: impl Into<String>, message: impl Into<String>, fault: ErrorFault) -> Self {
        Self::Vendor {
            code: code.into(),
            message: message.into(),
            fault,
            status: None,
            request_id: None,
        }
    }

    /// Wrap an arbitrary transport failure.
    pub fn transport(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Transport(err.into())
    }

    pub(crate) fn invalid(field: &'static str, value: &str) -> Self {
        Self::InvalidParameter {
            field,
            value: value.to_string(),
        }
    }

    /// Classify this error into a category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingCredentials(_) => ErrorCategory::Credentials,
            Self::UnsupportedFormat(_) | Self::InvalidParameter { .. } => {
                ErrorCategory::Validation
            }
            Self::Configuration(_) => ErrorCategory::Configuration,
            Self::Vendor { .. } => ErrorCategory::Vendor,
            Self::Network(_) => ErrorCategory::Network,
            Self::Timeout(_) => ErrorCategory::Timeout,
            Self::Transport(_) => ErrorCategory::Transport,
            Self::Serialization(_) => ErrorCategory::Serialization,
            Self::StreamRead(_) => ErrorCategory::Stream,
        }
    }

    /// Whether the error was raised before any request reached the vendor.
    pub fn is_local(&self) -> bool {
        self.category().is_local()
    }

    /// Split the error into code, message and fault hint.
    ///
    /// Vendor errors are reported as-is. Any other failure decodes to the
    /// `"general"` code carrying the underlying failure text.
    pub fn decode(&self) -> DecodedError {
        match self {
            Self::Vendor {
                code,
                message,
                fault,
                ..
            } => DecodedError {
                code: code.clone(),
                message: message.clone(),
                fault: Some(*fault),
            },
            Self::Network(err) => DecodedError::general(err.to_string()),
            Self::Transport(err) => DecodedError::general(err.to_string()),
            Self::Serialization(err) => DecodedError::general(err.to_string()),
            Self::StreamRead(message) => DecodedError::general(message.clone()),
            other => DecodedError::general(other.to_string()),
        }
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, SpeechError>;
