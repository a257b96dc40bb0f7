//! Shared test helpers: a stub Polly transport and connectors.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use speech::error::{ErrorFault, SpeechError};
use speech::polly::{
    AwsCredentials, Catalog, PollyConnector, PollyTransport, SynthesizeSpeechInput,
    SynthesizeSpeechOutput,
};
use speech::speaker::{AudioStream, Credentials};

/// What the stub answers to every synthesis request.
#[derive(Debug, Clone)]
pub enum Reply {
    Audio {
        bytes: Vec<u8>,
        request_characters: Option<usize>,
        content_type: Option<String>,
    },
    Vendor {
        code: String,
        message: String,
        fault: ErrorFault,
    },
    Failure(String),
}

impl Reply {
    pub fn audio(bytes: &[u8]) -> Self {
        Self::Audio {
            bytes: bytes.to_vec(),
            request_characters: Some(42),
            content_type: Some("audio/pcm".to_string()),
        }
    }
}

/// A transport that records requests and answers with a canned reply.
pub struct StubTransport {
    catalog: Catalog,
    reply: Reply,
    requests: Mutex<Vec<SynthesizeSpeechInput>>,
}

impl StubTransport {
    pub fn new(reply: Reply) -> Arc<Self> {
        Arc::new(Self {
            catalog: small_catalog(),
            reply,
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<SynthesizeSpeechInput> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl PollyTransport for StubTransport {
    fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    async fn synthesize_speech(
        &self,
        input: SynthesizeSpeechInput,
    ) -> Result<SynthesizeSpeechOutput, SpeechError> {
        self.requests.lock().unwrap().push(input);
        match &self.reply {
            Reply::Audio {
                bytes,
                request_characters,
                content_type,
            } => Ok(SynthesizeSpeechOutput {
                audio: AudioStream::from_bytes(bytes.clone()),
                request_characters: *request_characters,
                content_type: content_type.clone(),
            }),
            Reply::Vendor {
                code,
                message,
                fault,
            } => Err(SpeechError::vendor(code.clone(), message.clone(), *fault)),
            Reply::Failure(text) => Err(SpeechError::transport(std::io::Error::new(
                std::io::ErrorKind::TimedOut,
                text.clone(),
            ))),
        }
    }
}

/// Hands out the same stub transport and counts connections.
pub struct StubConnector {
    pub transport: Arc<StubTransport>,
    connects: AtomicUsize,
    regions: Mutex<Vec<String>>,
}

impl StubConnector {
    pub fn new(reply: Reply) -> Self {
        Self {
            transport: StubTransport::new(reply),
            connects: AtomicUsize::new(0),
            regions: Mutex::new(Vec::new()),
        }
    }

    pub fn connects(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }

    pub fn regions(&self) -> Vec<String> {
        self.regions.lock().unwrap().clone()
    }
}

impl PollyConnector for StubConnector {
    fn connect(
        &self,
        _credentials: AwsCredentials,
        region: &str,
    ) -> Result<Arc<dyn PollyTransport>, SpeechError> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        self.regions.lock().unwrap().push(region.to_string());
        let transport: Arc<dyn PollyTransport> = self.transport.clone();
        Ok(transport)
    }
}

/// A connector that must never be reached.
pub struct UnreachableConnector;

impl PollyConnector for UnreachableConnector {
    fn connect(
        &self,
        _credentials: AwsCredentials,
        _region: &str,
    ) -> Result<Arc<dyn PollyTransport>, SpeechError> {
        panic!("connector invoked despite invalid session parameters");
    }
}

pub fn small_catalog() -> Catalog {
    Catalog::new(
        ["json", "mp3", "ogg_vorbis", "pcm"],
        ["fr-FR", "it-IT", "en-GB"],
        ["Mathieu", "Lea", "Carla", "Amy"],
    )
}

pub fn credentials() -> Credentials {
    Credentials::new("AKIDEXAMPLE", "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY")
}
