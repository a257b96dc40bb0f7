//! Error classification for speech failures.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Broad error category, used to tell local failures from remote ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Credentials,
    Validation,
    Configuration,
    Vendor,
    Network,
    Timeout,
    Transport,
    Serialization,
    Stream,
}

impl ErrorCategory {
    /// Whether the failure was detected locally, before any request was issued.
    pub fn is_local(self) -> bool {
        matches!(
            self,
            Self::Credentials | Self::Validation | Self::Configuration
        )
    }
}

/// Who the vendor blames for a failed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ErrorFault {
    Client,
    Server,
    Unknown,
}

impl ErrorFault {
    /// Derive the fault from an HTTP status code.
    pub fn from_status(status: u16) -> Self {
        match status {
            400..=499 => Self::Client,
            500..=599 => Self::Server,
            _ => Self::Unknown,
        }
    }
}

/// Code, message and fault hint extracted from an error.
///
/// Vendor failures keep their own code; everything else reports `"general"`
/// with the underlying failure text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedError {
    pub code: String,
    pub message: String,
    pub fault: Option<ErrorFault>,
}

impl DecodedError {
    pub const GENERAL: &'static str = "general";

    pub(crate) fn general(message: impl Into<String>) -> Self {
        Self {
            code: Self::GENERAL.to_string(),
            message: message.into(),
            fault: None,
        }
    }
}
