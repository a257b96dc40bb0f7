//! The speaker capability: text in, audio stream out.
//!
//! Callers depend on [`Speaker`] only. Each backend (vendor and API
//! generation) is an independent implementation, so switching backends never
//! touches call sites.

pub mod ssml;
pub mod types;
pub mod validation;

pub use ssml::to_ssml;
pub use types::{AudioStream, Credentials, Spoken};

use async_trait::async_trait;

use crate::error::SpeechError;

/// A session on a text-to-speech engine.
///
/// Output format and sample rate are fixed when the session is built; the
/// rate, locale and voice can differ on every call.
#[async_trait]
pub trait Speaker: Send + Sync {
    /// Say `text` at `rate` (`"medium"`, `"slow"`, ...) in `locale` with `voice`.
    ///
    /// An empty `locale` selects the voice's default locale.
    async fn speak(
        &self,
        text: &str,
        rate: &str,
        locale: &str,
        voice: &str,
    ) -> Result<Spoken, SpeechError>;
}
