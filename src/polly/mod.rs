//! Amazon Polly speakers.
//!
//! [`PollyV1Speaker`] and [`PollyV2Speaker`] target the two generations of
//! the Polly API. Both talk to Polly through a [`PollyTransport`], obtained
//! from a [`PollyConnector`] at construction time; [`HttpConnector`] is the
//! default and signs requests with SigV4.

pub mod catalog;
pub mod http;
mod sigv4;
#[cfg(feature = "polly-v1")]
pub mod v1;
#[cfg(feature = "polly-v2")]
pub mod v2;

pub use catalog::Catalog;
pub use http::{HttpConnector, HttpPollyTransport};
#[cfg(feature = "polly-v1")]
pub use v1::{decode_error_v1, PollyV1Speaker};
#[cfg(feature = "polly-v2")]
pub use v2::{Engine, PollyV2Speaker, SpeechMarkType};

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use strum::{Display, EnumString};
use tracing::debug;

use crate::error::{Result, SpeechError};
use crate::speaker::{AudioStream, Credentials};

/// Static AWS credentials resolved from [`Credentials`].
#[derive(Clone, PartialEq, Eq)]
pub struct AwsCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: Option<String>,
}

impl fmt::Debug for AwsCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AwsCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"..")
            .field("session_token", &self.session_token.as_ref().map(|_| ".."))
            .finish()
    }
}

impl AwsCredentials {
    /// Resolve generic credentials: the id is the access key id, the first
    /// key the secret, and a non-empty second key the session token.
    pub fn from_credentials(credentials: &Credentials) -> Result<Self> {
        credentials.validate()?;
        Ok(Self {
            access_key_id: credentials.client_id.clone(),
            secret_access_key: credentials.primary_key().unwrap_or_default().to_string(),
            session_token: credentials.secondary_key().map(str::to_string),
        })
    }
}

/// How the `Text` field of a request is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TextType {
    Ssml,
    Text,
}

/// Body of a `SynthesizeSpeech` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SynthesizeSpeechInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine: Option<String>,
    /// Omitted to use the voice's default locale.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_code: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub lexicon_names: Vec<String>,
    pub output_format: String,
    pub sample_rate: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub speech_mark_types: Vec<String>,
    pub text: String,
    pub text_type: TextType,
    pub voice_id: String,
}

/// Result of a `SynthesizeSpeech` request; the audio is still streaming.
#[derive(Debug)]
pub struct SynthesizeSpeechOutput {
    pub audio: AudioStream,
    /// Characters Polly billed for the request.
    pub request_characters: Option<usize>,
    pub content_type: Option<String>,
}

/// An authenticated channel to one Polly region.
///
/// Transports classify failures: rejections by Polly become
/// [`SpeechError::Vendor`], anything else a generic variant.
#[async_trait]
pub trait PollyTransport: Send + Sync {
    /// Token sets this endpoint accepts.
    fn catalog(&self) -> &Catalog;

    /// Issue one `SynthesizeSpeech` request.
    async fn synthesize_speech(
        &self,
        input: SynthesizeSpeechInput,
    ) -> Result<SynthesizeSpeechOutput>;
}

/// Builds a transport from resolved credentials and a region.
pub trait PollyConnector {
    fn connect(&self, credentials: AwsCredentials, region: &str) -> Result<Arc<dyn PollyTransport>>;
}

/// Validate credentials and region, then connect. Nothing reaches the
/// connector unless both are usable.
pub(crate) fn open_transport(
    connector: &dyn PollyConnector,
    credentials: &Credentials,
    region: &str,
) -> Result<Arc<dyn PollyTransport>> {
    let credentials = AwsCredentials::from_credentials(credentials)?;
    if region.trim().is_empty() {
        return Err(SpeechError::Configuration(
            "region cannot be empty".to_string(),
        ));
    }
    debug!(region, access_key_id = %credentials.access_key_id, "connecting to polly");
    connector.connect(credentials, region)
}

/// Speak `text` once with a fresh PCM, 16 kHz session.
#[cfg(feature = "polly-v2")]
pub async fn speak(
    text: &str,
    rate: &str,
    locale: &str,
    voice: &str,
    credentials: &Credentials,
    region: &str,
) -> Result<crate::speaker::Spoken> {
    use crate::speaker::Speaker;

    let speaker = PollyV2Speaker::new(credentials, region, "pcm", 16_000)?;
    speaker.speak(text, rate, locale, voice).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_serializes_in_polly_casing() {
        let input = SynthesizeSpeechInput {
            engine: None,
            language_code: None,
            lexicon_names: vec![],
            output_format: "mp3".to_string(),
            sample_rate: "22050".to_string(),
            speech_mark_types: vec![],
            text: "<speak/>".to_string(),
            text_type: TextType::Ssml,
            voice_id: "Lea".to_string(),
        };
        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "OutputFormat": "mp3",
                "SampleRate": "22050",
                "Text": "<speak/>",
                "TextType": "ssml",
                "VoiceId": "Lea",
            })
        );
    }

    #[test]
    fn second_key_becomes_session_token() {
        let creds = Credentials::new("AKID", "secret").with_key("token");
        let aws = AwsCredentials::from_credentials(&creds).unwrap();
        assert_eq!(aws.secret_access_key, "secret");
        assert_eq!(aws.session_token.as_deref(), Some("token"));

        let aws = AwsCredentials::from_credentials(&Credentials::new("AKID", "secret").with_key(""))
            .unwrap();
        assert_eq!(aws.session_token, None);
    }
}
