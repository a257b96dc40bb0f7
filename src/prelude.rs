//! Convenience re-exports for common use.

pub use crate::config::SpeechConfig;
pub use crate::error::{DecodedError, ErrorFault, Result, SpeechError};
pub use crate::speaker::{AudioStream, Credentials, Speaker, Spoken};

#[cfg(feature = "polly-v1")]
pub use crate::polly::PollyV1Speaker;
#[cfg(feature = "polly-v2")]
pub use crate::polly::PollyV2Speaker;
