mod artifact;
mod error;
mod language;
mod provider;
mod stream;

use std::{
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use tracing::{debug, info, warn};

pub use artifact::{AudioArtifact, AUDIO_MIME_TYPE};
pub use error::{TtsError, TtsResult};
pub use language::{SynthesisLanguage, SUPPORTED_LANGUAGES};
pub use provider::{split_text, GoogleTranslateTts, SpeechProvider, GOOGLE_TTS_BASE_URL, MAX_CHUNK_CHARS};
pub use stream::ArtifactStream;

/// Upper bound on a single provider call.
pub const DEFAULT_SYNTHESIS_TIMEOUT: Duration = Duration::from_secs(30);

/// Turn a raw path segment into speakable text: `_` becomes a space and
/// every `/` is dropped.
pub fn normalize_text(raw: &str) -> String {
    raw.replace('_', " ").replace('/', "")
}

/// A validated audio-generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisRequest {
    language: SynthesisLanguage,
    text: String,
}

impl SynthesisRequest {
    /// Normalize the text and check the language against the allow-list.
    pub fn new(language_code: &str, raw_text: &str) -> TtsResult<Self> {
        let text = normalize_text(raw_text);
        let language = SynthesisLanguage::parse(language_code)?;
        Ok(Self { language, text })
    }

    pub fn language(&self) -> SynthesisLanguage {
        self.language
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Runs a provider call and parks the audio in a temporary artifact.
#[derive(Clone)]
pub struct SpeechGateway {
    provider: Arc<dyn SpeechProvider>,
    artifact_dir: PathBuf,
    timeout: Duration,
}

impl std::fmt::Debug for SpeechGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpeechGateway")
            .field("provider", &"<dyn SpeechProvider>")
            .field("artifact_dir", &self.artifact_dir)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl SpeechGateway {
    /// Gateway writing artifacts to the OS temp dir with the default timeout.
    pub fn new(provider: Arc<dyn SpeechProvider>) -> Self {
        Self {
            provider,
            artifact_dir: std::env::temp_dir(),
            timeout: DEFAULT_SYNTHESIS_TIMEOUT,
        }
    }

    pub fn with_artifact_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.artifact_dir = dir.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn artifact_dir(&self) -> &Path {
        &self.artifact_dir
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Synthesize `request` and write the audio to a fresh temporary file.
    ///
    /// No retries. The returned artifact deletes its file when dropped or
    /// once its stream has been fully read.
    pub async fn synthesize(&self, request: &SynthesisRequest) -> TtsResult<AudioArtifact> {
        info!(
            language = %request.language(),
            chars = request.text().chars().count(),
            "synthesizing speech"
        );

        let audio = match tokio::time::timeout(
            self.timeout,
            self.provider.synthesize(request.text(), request.language()),
        )
        .await
        {
            Ok(result) => result?,
            Err(_) => {
                warn!("speech provider timed out after {:?}", self.timeout);
                return Err(TtsError::Timeout(self.timeout));
            }
        };

        let artifact = AudioArtifact::materialize(&self.artifact_dir, &audio).await?;
        debug!(
            path = %artifact.path().display(),
            bytes = artifact.len(),
            "audio artifact ready"
        );
        Ok(artifact)
    }
}
