//! Polly over HTTPS: the REST `SynthesizeSpeech` call, signed with SigV4.

use std::sync::{Arc, OnceLock};
use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Url;
use tracing::debug;

use super::catalog::Catalog;
use super::sigv4::{self, SignableRequest};
use super::{AwsCredentials, PollyConnector, PollyTransport, SynthesizeSpeechInput, SynthesizeSpeechOutput};
use crate::error::{ErrorFault, Result, SpeechError};
use crate::speaker::AudioStream;
use crate::util::timeout::with_timeout;

const SERVICE: &str = "polly";
const SPEECH_PATH: &str = "/v1/speech";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);
const JSON: &str = "application/json";

const REQUEST_CHARACTERS: &str = "x-amzn-requestcharacters";
const REQUEST_ID: &str = "x-amzn-requestid";
const ERROR_TYPE: &str = "x-amzn-errortype";
const SECURITY_TOKEN: &str = "x-amz-security-token";
const AMZ_DATE: &str = "x-amz-date";

static SHARED_CLIENT: OnceLock<reqwest::Client> = OnceLock::new();

/// Get (or create) the shared reqwest client.
///
/// Only connecting is bounded; the response body streams for as long as the
/// caller keeps reading.
fn shared_client() -> &'static reqwest::Client {
    SHARED_CLIENT.get_or_init(|| {
        reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(30))
            .pool_max_idle_per_host(10)
            .build()
            .expect("Failed to build HTTP client")
    })
}

/// Connects to `https://polly.{region}.amazonaws.com`, or to an explicit endpoint.
#[derive(Debug, Clone)]
pub struct HttpConnector {
    endpoint: Option<String>,
    timeout: Duration,
    catalog: Catalog,
}

impl Default for HttpConnector {
    fn default() -> Self {
        Self {
            endpoint: None,
            timeout: DEFAULT_TIMEOUT,
            catalog: Catalog::polly(),
        }
    }
}

impl HttpConnector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Send requests to `endpoint` instead of the regional Polly host.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Bound the time until Polly starts answering a request.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = catalog;
        self
    }
}

impl PollyConnector for HttpConnector {
    fn connect(&self, credentials: AwsCredentials, region: &str) -> Result<Arc<dyn PollyTransport>> {
        let endpoint = self
            .endpoint
            .clone()
            .unwrap_or_else(|| format!("https://polly.{region}.amazonaws.com"));
        let transport = HttpPollyTransport::new(credentials, region, &endpoint)?
            .with_timeout(self.timeout)
            .with_catalog(self.catalog.clone());
        Ok(Arc::new(transport))
    }
}

/// A signed HTTP channel to one Polly endpoint.
#[derive(Debug, Clone)]
pub struct HttpPollyTransport {
    credentials: AwsCredentials,
    region: String,
    url: Url,
    host: String,
    timeout: Duration,
    catalog: Catalog,
}

impl HttpPollyTransport {
    pub fn new(credentials: AwsCredentials, region: &str, endpoint: &str) -> Result<Self> {
        let url = Url::parse(&format!("{}{SPEECH_PATH}", endpoint.trim_end_matches('/')))
            .map_err(|e| SpeechError::Configuration(format!("invalid endpoint {endpoint}: {e}")))?;
        let host = match (url.host_str(), url.port()) {
            (Some(host), Some(port)) => format!("{host}:{port}"),
            (Some(host), None) => host.to_string(),
            (None, _) => {
                return Err(SpeechError::Configuration(format!(
                    "endpoint has no host: {endpoint}"
                )))
            }
        };
        Ok(Self {
            credentials,
            region: region.to_string(),
            url,
            host,
            timeout: DEFAULT_TIMEOUT,
            catalog: Catalog::polly(),
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = catalog;
        self
    }

    fn signed_headers(&self, body: &[u8]) -> Result<HeaderMap> {
        let signature = sigv4::sign(
            &SignableRequest {
                method: "POST",
                host: &self.host,
                path: self.url.path(),
                query: self.url.query().unwrap_or_default(),
                headers: &[("content-type", JSON)],
                payload: body,
            },
            &self.credentials,
            &self.region,
            SERVICE,
            chrono::Utc::now(),
        );

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON));
        headers.insert(AMZ_DATE, header_value(&signature.amz_date)?);
        headers.insert(AUTHORIZATION, header_value(&signature.authorization)?);
        if let Some(token) = &self.credentials.session_token {
            headers.insert(SECURITY_TOKEN, header_value(token)?);
        }
        Ok(headers)
    }
}

#[async_trait]
impl PollyTransport for HttpPollyTransport {
    fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    async fn synthesize_speech(
        &self,
        input: SynthesizeSpeechInput,
    ) -> Result<SynthesizeSpeechOutput> {
        let body = serde_json::to_vec(&input)?;
        let headers = self.signed_headers(&body)?;

        debug!(
            voice = %input.voice_id,
            locale = input.language_code.as_deref().unwrap_or("default"),
            format = %input.output_format,
            sample_rate = %input.sample_rate,
            "polly synthesize request"
        );

        with_timeout(self.timeout, async {
            let response = shared_client()
                .post(self.url.clone())
                .headers(headers)
                .body(body)
                .send()
                .await?;

            parse_speech_response(response).await
        })
        .await
    }
}

fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| SpeechError::Configuration(format!("invalid header value: {e}")))
}

fn header_string(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToString::to_string)
}

async fn parse_speech_response(response: reqwest::Response) -> Result<SynthesizeSpeechOutput> {
    let status = response.status().as_u16();
    let request_id = header_string(response.headers(), REQUEST_ID);

    if !response.status().is_success() {
        let error_type = header_string(response.headers(), ERROR_TYPE);
        let body = response.text().await.unwrap_or_default();
        return Err(vendor_error(status, error_type.as_deref(), &body, request_id));
    }

    let content_type = header_string(response.headers(), CONTENT_TYPE.as_str());
    let request_characters =
        header_string(response.headers(), REQUEST_CHARACTERS).and_then(|v| v.parse().ok());

    debug!(
        status,
        request_id = request_id.as_deref().unwrap_or_default(),
        content_type = content_type.as_deref().unwrap_or_default(),
        "polly synthesize response"
    );

    let audio = AudioStream::new(
        response
            .bytes_stream()
            .map(|chunk| chunk.map_err(|e| SpeechError::StreamRead(e.to_string()))),
    );

    Ok(SynthesizeSpeechOutput {
        audio,
        request_characters,
        content_type,
    })
}

/// Build a vendor error from a failed Polly response.
///
/// The code comes from `x-amzn-ErrorType`, else the body's `__type`/`code`;
/// the fault follows the status class.
pub(crate) fn vendor_error(
    status: u16,
    error_type: Option<&str>,
    body: &str,
    request_id: Option<String>,
) -> SpeechError {
    let parsed = serde_json::from_str::<serde_json::Value>(body).ok();
    let field = |names: &[&str]| {
        parsed.as_ref().and_then(|value| {
            names
                .iter()
                .find_map(|name| value.get(*name).and_then(|v| v.as_str()))
                .map(ToString::to_string)
        })
    };

    let code = error_type
        .and_then(sanitize_error_code)
        .or_else(|| field(&["__type", "code", "Code"]).as_deref().and_then(sanitize_error_code))
        .unwrap_or_else(|| "UnknownError".to_string());

    let message = field(&["message", "Message"])
        .or_else(|| Some(body.trim().to_string()).filter(|b| !b.is_empty() && parsed.is_none()))
        .unwrap_or_else(|| format!("HTTP status {status}"));

    SpeechError::Vendor {
        code,
        message,
        fault: ErrorFault::from_status(status),
        status: Some(status),
        request_id,
    }
}

/// `"InvalidSsmlException:http://internal.amazon.com/..."` and
/// `"com.amazonaws.polly#InvalidSsmlException"` both yield `InvalidSsmlException`.
fn sanitize_error_code(raw: &str) -> Option<String> {
    let code = raw.split(':').next().unwrap_or_default();
    let code = code.rsplit('#').next().unwrap_or_default().trim();
    (!code.is_empty()).then(|| code.to_string())
}
