//! Speaker for the current generation of the Polly API.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use tracing::debug;

use super::http::HttpConnector;
use super::{open_transport, PollyConnector, PollyTransport, SynthesizeSpeechInput, TextType};
use crate::error::{Result, SpeechError};
use crate::speaker::validation::{accept, accept_optional, normalize_output_format};
use crate::speaker::{to_ssml, Credentials, Speaker, Spoken};

/// Output format that returns speech marks instead of audio.
const SPEECH_MARKS_FORMAT: &str = "json";

/// Synthesis engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Engine {
    Standard,
    Neural,
    LongForm,
    Generative,
}

/// Kind of metadata returned by the `json` output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SpeechMarkType {
    Sentence,
    Ssml,
    Viseme,
    Word,
}

/// A Polly session with a fixed region, output format and sample rate.
///
/// `with_*` methods finish configuring the session before it is shared.
#[derive(Clone)]
pub struct PollyV2Speaker {
    transport: Arc<dyn PollyTransport>,
    region: String,
    format: String,
    sample_rate: u32,
    engine: Option<Engine>,
    speech_marks: Vec<SpeechMarkType>,
    lexicons: Vec<String>,
}

impl std::fmt::Debug for PollyV2Speaker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PollyV2Speaker")
            .field("region", &self.region)
            .field("format", &self.format)
            .field("sample_rate", &self.sample_rate)
            .field("engine", &self.engine)
            .field("speech_marks", &self.speech_marks)
            .field("lexicons", &self.lexicons)
            .finish_non_exhaustive()
    }
}

impl PollyV2Speaker {
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
        let normalized = normalize_output_format(format);
        let transport = open_transport(connector, credentials, region)?;
        let format = match accept("output format", normalized, transport.catalog().output_formats()) {
            Ok(format) => format.to_string(),
            Err(_) => return Err(SpeechError::UnsupportedFormat(normalized.to_string())),
        };

        debug!(region, format = %format, sample_rate, "polly v2 session ready");

        Ok(Self {
            transport,
            region: region.to_string(),
            format,
            sample_rate,
            engine: None,
            speech_marks: Vec::new(),
            lexicons: Vec::new(),
        })
    }

    pub fn with_engine(mut self, engine: Engine) -> Self {
        self.engine = Some(engine);
        self
    }

    /// Speech mark types requested when the format is `json`.
    /// Without any, sentence and word marks are requested.
    pub fn with_speech_marks(mut self, marks: impl IntoIterator<Item = SpeechMarkType>) -> Self {
        self.speech_marks = marks.into_iter().collect();
        self
    }

    /// Pronunciation lexicons stored in the Polly account.
    pub fn with_lexicons<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.lexicons = names.into_iter().map(Into::into).collect();
        self
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

    pub fn engine(&self) -> Option<Engine> {
        self.engine
    }

    fn speech_mark_types(&self) -> Vec<String> {
        if self.format != SPEECH_MARKS_FORMAT {
            return Vec::new();
        }
        if self.speech_marks.is_empty() {
            return vec![
                SpeechMarkType::Sentence.to_string(),
                SpeechMarkType::Word.to_string(),
            ];
        }
        self.speech_marks.iter().map(ToString::to_string).collect()
    }
}

#[async_trait]
impl Speaker for PollyV2Speaker {
    async fn speak(&self, text: &str, rate: &str, locale: &str, voice: &str) -> Result<Spoken> {
        let catalog = self.transport.catalog();
        let language_code = accept_optional("locale", locale, catalog.language_codes())?;
        let voice_id = accept("voice name", voice, catalog.voice_ids())?;

        let input = SynthesizeSpeechInput {
            engine: self.engine.map(|engine| engine.to_string()),
            language_code: language_code.map(str::to_string),
            lexicon_names: self.lexicons.clone(),
            output_format: self.format.clone(),
            sample_rate: self.sample_rate.to_string(),
            speech_mark_types: self.speech_mark_types(),
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
            content_type: output.content_type,
        })
    }
}
