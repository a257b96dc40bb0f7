//! Session configuration (explicit values > environment > defaults).

use crate::error::{Result, SpeechError};
use crate::polly::HttpConnector;
use crate::speaker::Credentials;

pub const DEFAULT_REGION: &str = "eu-west-2";
pub const DEFAULT_OUTPUT_FORMAT: &str = "pcm";
pub const DEFAULT_SAMPLE_RATE: u32 = 16_000;

/// Everything needed to open a speaker session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechConfig {
    pub credentials: Credentials,
    pub region: String,
    pub output_format: String,
    pub sample_rate: u32,
    /// Overrides the regional Polly endpoint.
    pub endpoint: Option<String>,
}

impl SpeechConfig {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            region: DEFAULT_REGION.to_string(),
            output_format: DEFAULT_OUTPUT_FORMAT.to_string(),
            sample_rate: DEFAULT_SAMPLE_RATE,
            endpoint: None,
        }
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    pub fn with_output_format(mut self, format: impl Into<String>) -> Self {
        self.output_format = format.into();
        self
    }

    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Load from environment variables, reading `.env` first if present.
    ///
    /// | setting       | variables                                  |
    /// |---------------|--------------------------------------------|
    /// | client id     | `SPEECH_ID`, `AWS_ACCESS_KEY_ID`           |
    /// | key           | `SPEECH_KEY`, `AWS_SECRET_ACCESS_KEY`      |
    /// | session token | `AWS_SESSION_TOKEN`                        |
    /// | region        | `SPEECH_REGION`, `AWS_REGION`              |
    /// | format        | `SPEECH_FORMAT`                            |
    /// | sample rate   | `SPEECH_SAMPLE_RATE`                       |
    /// | endpoint      | `SPEECH_ENDPOINT`                          |
    ///
    /// Missing credentials are not an error here; opening a session rejects them.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Like [`SpeechConfig::from_env`], reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let first = |names: &[&str]| {
            names
                .iter()
                .filter_map(|&name| lookup(name))
                .find(|value| !value.trim().is_empty())
        };

        let mut credentials = Credentials::new(
            first(&["SPEECH_ID", "AWS_ACCESS_KEY_ID"]).unwrap_or_default(),
            first(&["SPEECH_KEY", "AWS_SECRET_ACCESS_KEY"]).unwrap_or_default(),
        );
        if let Some(token) = first(&["AWS_SESSION_TOKEN"]) {
            credentials = credentials.with_key(token);
        }

        let mut config = Self::new(credentials);
        if let Some(region) = first(&["SPEECH_REGION", "AWS_REGION"]) {
            config.region = region;
        }
        if let Some(format) = first(&["SPEECH_FORMAT"]) {
            config.output_format = format;
        }
        if let Some(rate) = first(&["SPEECH_SAMPLE_RATE"]) {
            config.sample_rate = rate.trim().parse().map_err(|_| {
                SpeechError::Configuration(format!("invalid SPEECH_SAMPLE_RATE: {rate}"))
            })?;
        }
        config.endpoint = first(&["SPEECH_ENDPOINT"]);

        Ok(config)
    }

    /// HTTP connector honouring the endpoint override.
    pub fn connector(&self) -> HttpConnector {
        match &self.endpoint {
            Some(endpoint) => HttpConnector::new().with_endpoint(endpoint.clone()),
            None => HttpConnector::new(),
        }
    }

    #[cfg(feature = "polly-v1")]
    pub fn polly_v1(&self) -> Result<crate::polly::PollyV1Speaker> {
        crate::polly::PollyV1Speaker::connect_with(
            &self.connector(),
            &self.credentials,
            &self.region,
            &self.output_format,
            self.sample_rate,
        )
    }

    #[cfg(feature = "polly-v2")]
    pub fn polly_v2(&self) -> Result<crate::polly::PollyV2Speaker> {
        crate::polly::PollyV2Speaker::connect_with(
            &self.connector(),
            &self.credentials,
            &self.region,
            &self.output_format,
            self.sample_rate,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = SpeechConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.region, DEFAULT_REGION);
        assert_eq!(config.output_format, "pcm");
        assert_eq!(config.sample_rate, 16_000);
        assert_eq!(config.endpoint, None);
        assert!(config.credentials.validate().is_err());
    }

    #[test]
    fn speech_variables_win_over_aws_ones() {
        let config = SpeechConfig::from_lookup(lookup(&[
            ("SPEECH_ID", "speech-id"),
            ("AWS_ACCESS_KEY_ID", "aws-id"),
            ("AWS_SECRET_ACCESS_KEY", "aws-secret"),
            ("AWS_SESSION_TOKEN", "token"),
            ("AWS_REGION", "us-east-1"),
            ("SPEECH_FORMAT", "ogg"),
            ("SPEECH_SAMPLE_RATE", "22050"),
        ]))
        .unwrap();

        assert_eq!(config.credentials.client_id, "speech-id");
        assert_eq!(config.credentials.keys, vec!["aws-secret", "token"]);
        assert_eq!(config.region, "us-east-1");
        assert_eq!(config.output_format, "ogg");
        assert_eq!(config.sample_rate, 22_050);
    }

    #[test]
    fn blank_values_are_ignored() {
        let config =
            SpeechConfig::from_lookup(lookup(&[("SPEECH_REGION", "  "), ("AWS_REGION", "eu-west-1")]))
                .unwrap();
        assert_eq!(config.region, "eu-west-1");
    }

    #[test]
    fn bad_sample_rate_is_a_configuration_error() {
        let err = SpeechConfig::from_lookup(lookup(&[("SPEECH_SAMPLE_RATE", "fast")])).unwrap_err();
        assert!(matches!(err, SpeechError::Configuration(message) if message.contains("fast")));
    }
}
