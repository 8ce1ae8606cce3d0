use std::time::Duration;

use thiserror::Error;

/// Speech synthesis failures.
///
/// Only `UnsupportedLanguage` is the caller's fault; every other variant is a
/// server-side failure whose detail must stay in the logs.
#[derive(Debug, Error)]
pub enum TtsError {
    #[error("Code de langue '{0}' non supporté pour la synthèse vocale.")]
    UnsupportedLanguage(String),

    #[error("no text to speak")]
    EmptyText,

    #[error("provider request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("provider returned HTTP {status} for chunk {chunk}")]
    ProviderStatus { status: u16, chunk: usize },

    #[error("provider returned no audio")]
    EmptyAudio,

    #[error("synthesis timed out after {0:?}")]
    Timeout(Duration),

    #[error("audio artifact I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

impl TtsError {
    /// True when the request itself was invalid and the provider was never involved.
    pub fn is_client_error(&self) -> bool {
        matches!(self, TtsError::UnsupportedLanguage(_))
    }
}

pub type TtsResult<T> = Result<T, TtsError>;
