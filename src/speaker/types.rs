//! Credentials and synthesis results shared by every speaker.

use std::fmt;
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use futures::stream::{self, BoxStream, Stream, StreamExt};

use crate::error::{Result, SpeechError};

/// Service credentials: an id presented to the service and one or more keys.
///
/// For Polly the id is the access key id, `keys[0]` the secret access key,
/// and an optional non-empty `keys[1]` a session token.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub client_id: String,
    pub keys: Vec<String>,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("keys", &format_args!("[{} redacted]", self.keys.len()))
            .finish()
    }
}

impl Credentials {
    pub fn new(client_id: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            keys: vec![key.into()],
        }
    }

    /// Append another key (for Polly, a session token).
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.keys.push(key.into());
        self
    }

    /// Check that the id and the first key are present.
    pub fn validate(&self) -> Result<()> {
        if self.client_id.is_empty() {
            return Err(SpeechError::MissingCredentials("client id"));
        }
        match self.keys.first() {
            Some(key) if !key.is_empty() => Ok(()),
            _ => Err(SpeechError::MissingCredentials("key")),
        }
    }

    /// The primary secret key, if any.
    pub fn primary_key(&self) -> Option<&str> {
        self.keys.first().map(String::as_str)
    }

    /// The second key, when present and non-empty.
    pub fn secondary_key(&self) -> Option<&str> {
        self.keys
            .get(1)
            .map(String::as_str)
            .filter(|key| !key.is_empty())
    }
}

/// Single-pass stream of audio bytes.
///
/// Dropping the stream releases the underlying response. Failures while
/// reading are reported as [`SpeechError::StreamRead`].
pub struct AudioStream {
    inner: BoxStream<'static, Result<Bytes>>,
}

impl AudioStream {
    pub fn new<S>(stream: S) -> Self
    where
        S: Stream<Item = Result<Bytes>> + Send + 'static,
    {
        Self {
            inner: stream.boxed(),
        }
    }

    /// An already-buffered stream holding `bytes`.
    pub fn from_bytes(bytes: impl Into<Bytes>) -> Self {
        Self::new(stream::iter(std::iter::once(Ok(bytes.into()))))
    }

    /// Read the whole stream into memory.
    pub async fn read_to_end(mut self) -> Result<Vec<u8>> {
        let mut audio = Vec::new();
        while let Some(chunk) = self.inner.next().await {
            audio.extend_from_slice(&chunk?);
        }
        Ok(audio)
    }
}

impl Stream for AudioStream {
    type Item = Result<Bytes>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.poll_next_unpin(cx)
    }
}

impl fmt::Debug for AudioStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AudioStream").finish_non_exhaustive()
    }
}

/// Audio produced by one `speak` call.
#[derive(Debug)]
pub struct Spoken {
    /// The recording; owned by the caller.
    pub audio: AudioStream,
    /// Length in bytes of the submitted text's encoded form, for accounting.
    pub text_len: usize,
    /// Recording format actually used (`"mp3"`, `"ogg_vorbis"`, `"pcm"`, `"json"`).
    pub format: String,
    /// HTTP `Content-Type` for the recording, when the backend reports one.
    pub content_type: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_require_id_and_first_key() {
        assert!(Credentials::new("AKID", "secret").validate().is_ok());

        let err = Credentials::new("", "secret").validate().unwrap_err();
        assert!(matches!(err, SpeechError::MissingCredentials("client id")));

        let no_keys = Credentials {
            client_id: "AKID".to_string(),
            keys: vec![],
        };
        assert!(matches!(
            no_keys.validate(),
            Err(SpeechError::MissingCredentials("key"))
        ));

        let empty_first = Credentials::new("AKID", "").with_key("token");
        assert!(matches!(
            empty_first.validate(),
            Err(SpeechError::MissingCredentials("key"))
        ));
    }

    #[test]
    fn debug_hides_keys() {
        let creds = Credentials::new("AKID", "very-secret");
        let shown = format!("{creds:?}");
        assert!(shown.contains("AKID"));
        assert!(!shown.contains("very-secret"));
    }

    #[tokio::test]
    async fn read_to_end_joins_chunks_and_surfaces_read_errors() {
        let chunks = vec![Ok(Bytes::from_static(b"ab")), Ok(Bytes::from_static(b"cd"))];
        let audio = AudioStream::new(stream::iter(chunks)).read_to_end().await.unwrap();
        assert_eq!(audio, b"abcd");

        let broken = vec![
            Ok(Bytes::from_static(b"ab")),
            Err(SpeechError::StreamRead("connection reset".to_string())),
        ];
        let err = AudioStream::new(stream::iter(broken))
            .read_to_end()
            .await
            .unwrap_err();
        assert!(matches!(err, SpeechError::StreamRead(_)));
    }
}
