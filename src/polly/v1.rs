//! Speaker for the first generation of the Polly API.
//!
//! Requests are plain strings: no engine selection, no speech marks, and
//! the response's content type is not reported.

use std::sync::Arc;

use async_trait::async_trait;

use super::http::HttpConnector;
use super::{open_transport, PollyConnector, PollyTransport, SynthesizeSpeechInput, TextType};
use crate::error::{Result, SpeechError};
use crate::speaker::validation::{accept, accept_optional, normalize_output_format};
use crate::speaker::{to_ssml, Credentials, Speaker, Spoken};

/// A Polly session with a fixed region, output format and sample rate.
#[derive(Clone)]
pub struct PollyV1Speaker {
    transport: Arc<dyn PollyTransport>,
    region: String,
    format: String,
    sample_rate: u32,
}

impl std::fmt::Debug for PollyV1Speaker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PollyV1Speaker")
            .field("region", &self.region)
            .field("format", &self.format)
            .field("sample_rate", &self.sample_rate)
            .finish_non_exhaustive()
    }
}

impl PollyV1Speaker {
    /// Open a session over HTTPS.
    pub fn new(credentials: &Credentials, region: &str, format: &str, sample_rate: u32) -> Result<Self> {
        Self::connect_with(&HttpConnector::default(), credentials, region, format, sample_rate)
    }

    /// Open a session through `connector`.
    pub fn connect_with(
        connector: &dyn PollyConnector,
        credentials: &Credentials,
        region: &str,
        format: &str,
        sample_rate: u32,
    ) -> Result<Self> {
        let transport = open_transport(connector, credentials, region)?;
        let format = accept(
            "output format",
            normalize_output_format(format),
            transport.catalog().output_formats(),
        )
        .map_err(|_| SpeechError::UnsupportedFormat(format.to_string()))?
        .to_string();

        Ok(Self {
            transport,
            region: region.to_string(),
            format,
            sample_rate,
        })
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn format(&self) -> &str {
        &self.format
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }
}

#[async_trait]
impl Speaker for PollyV1Speaker {
    async fn speak(&self, text: &str, rate: &str, locale: &str, voice: &str) -> Result<Spoken> {
        let catalog = self.transport.catalog();
        let language_code = accept_optional("locale", locale, catalog.language_codes())?;
        let voice_id = accept("voice name", voice, catalog.voice_ids())?;

        let input = SynthesizeSpeechInput {
            engine: None,
            language_code: language_code.map(str::to_string),
            lexicon_names: Vec::new(),
            output_format: self.format.clone(),
            sample_rate: self.sample_rate.to_string(),
            speech_mark_types: Vec::new(),
            text: to_ssml(text, rate),
            text_type: TextType::Ssml,
            voice_id: voice_id.to_string(),
        };
        let encoded_len = input.text.len();

        let output = self.transport.synthesize_speech(input).await?;
        Ok(Spoken {
            audio: output.audio,
            text_len: output.request_characters.unwrap_or(encoded_len),
            format: self.format.clone(),
            content_type: None,
        })
    }
}

/// Code and message of an error. Non-vendor errors report `"general"`.
pub fn decode_error_v1(err: &SpeechError) -> (String, String) {
    let decoded = err.decode();
    (decoded.code, decoded.message)
}
