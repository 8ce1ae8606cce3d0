//! Common utilities for integration tests

#![allow(dead_code)]

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::Request,
    response::Response,
    Router,
};
use bytes::Bytes;
use tempfile::TempDir;
use tower::ServiceExt;

use alphabet_core::AlphabetTable;
use server::{build_router, config::ServerConfig, AppState};
use tts_core::{SpeechGateway, SpeechProvider, SynthesisLanguage, TtsError, TtsResult};

pub const FAKE_MP3: &[u8] = b"ID3\x04\x00fake-mp3-frames";

/// Speech provider stand-in that records every call.
pub struct SpyProvider {
    fail: bool,
    calls: AtomicUsize,
    requests: Mutex<Vec<(String, String)>>,
}

impl SpyProvider {
    pub fn succeeding() -> Self {
        Self {
            fail: false,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::succeeding()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// (text, language) pairs in call order.
    pub fn requests(&self) -> Vec<(String, String)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl SpeechProvider for SpyProvider {
    async fn synthesize(&self, text: &str, language: SynthesisLanguage) -> TtsResult<Bytes> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests
            .lock()
            .unwrap()
            .push((text.to_string(), language.as_str().to_string()));
        if self.fail {
            return Err(TtsError::ProviderStatus { status: 503, chunk: 0 });
        }
        Ok(Bytes::from_static(FAKE_MP3))
    }
}

pub struct TestApp {
    pub router: Router,
    pub provider: Arc<SpyProvider>,
    pub audio_dir: TempDir,
}

impl TestApp {
    pub async fn get(&self, uri: &str) -> Response {
        self.router
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    /// Files currently sitting in the artifact directory.
    pub fn leftover_files(&self) -> usize {
        count_files(self.audio_dir.path())
    }
}

pub fn count_files(dir: &Path) -> usize {
    std::fs::read_dir(dir).unwrap().count()
}

/// Create a test app backed by the embedded table and `provider`.
pub fn create_test_app_with(provider: SpyProvider) -> TestApp {
    let provider = Arc::new(provider);
    let audio_dir = tempfile::tempdir().unwrap();

    let speech = SpeechGateway::new(provider.clone()).with_artifact_dir(audio_dir.path());
    let state = AppState {
        alphabet: Arc::new(AlphabetTable::embedded().unwrap()),
        speech: Arc::new(speech),
    };
    let router = build_router(state, &ServerConfig::default());

    TestApp {
        router,
        provider,
        audio_dir,
    }
}

pub fn create_test_app() -> TestApp {
    create_test_app_with(SpyProvider::succeeding())
}

pub async fn body_bytes(response: Response) -> Bytes {
    to_bytes(response.into_body(), usize::MAX).await.unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
