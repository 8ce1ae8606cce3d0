//! Text-to-speech providers.
//!
//! The gateway only needs whole-file MP3 output, so a provider is a single
//! async call from text to audio bytes. [`GoogleTranslateTts`] talks to the
//! public Google Translate speech endpoint.

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use tracing::debug;

use crate::error::{TtsError, TtsResult};
use crate::language::SynthesisLanguage;

/// Default endpoint host for [`GoogleTranslateTts`].
pub const GOOGLE_TTS_BASE_URL: &str = "https://translate.google.com";

/// The endpoint rejects longer inputs, so text is sent in pieces of at most this many chars.
pub const MAX_CHUNK_CHARS: usize = 100;

const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

#[async_trait]
pub trait SpeechProvider: Send + Sync {
    /// Synthesize `text` as MP3 audio.
    async fn synthesize(&self, text: &str, language: SynthesisLanguage) -> TtsResult<Bytes>;
}

/// Google Translate TTS client.
#[derive(Debug, Clone)]
pub struct GoogleTranslateTts {
    client: reqwest::Client,
    base_url: String,
}

impl GoogleTranslateTts {
    pub fn new() -> TtsResult<Self> {
        Self::with_base_url(GOOGLE_TTS_BASE_URL)
    }

    /// Point the client at another host (regional domain, mock server).
    pub fn with_base_url(base_url: impl Into<String>) -> TtsResult<Self> {
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn fetch_chunk(
        &self,
        chunk: &str,
        idx: usize,
        total: usize,
        language: SynthesisLanguage,
    ) -> TtsResult<Bytes> {
        let url = format!("{}/translate_tts", self.base_url);
        let idx_param = idx.to_string();
        let total_param = total.to_string();
        let len_param = chunk.chars().count().to_string();

        let response = self
            .client
            .get(&url)
            .query(&[
                ("ie", "UTF-8"),
                ("q", chunk),
                ("tl", language.as_str()),
                ("client", "tw-ob"),
                ("ttsspeed", "1"),
                ("total", total_param.as_str()),
                ("idx", idx_param.as_str()),
                ("textlen", len_param.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TtsError::ProviderStatus {
                status: status.as_u16(),
                chunk: idx,
            });
        }

        let bytes = response.bytes().await?;
        debug!(chunk = idx, total, bytes = bytes.len(), "received audio chunk");
        Ok(bytes)
    }
}

#[async_trait]
impl SpeechProvider for GoogleTranslateTts {
    async fn synthesize(&self, text: &str, language: SynthesisLanguage) -> TtsResult<Bytes> {
        let text = text.trim();
        if text.is_empty() {
            return Err(TtsError::EmptyText);
        }

        let chunks = split_text(text, MAX_CHUNK_CHARS);
        let mut audio = BytesMut::new();
        for (idx, chunk) in chunks.iter().enumerate() {
            let bytes = self.fetch_chunk(chunk, idx, chunks.len(), language).await?;
            audio.extend_from_slice(&bytes);
        }

        if audio.is_empty() {
            return Err(TtsError::EmptyAudio);
        }
        Ok(audio.freeze())
    }
}

/// Split `text` into pieces of at most `max_chars` characters on whitespace.
/// Words longer than `max_chars` are cut on char boundaries.
pub fn split_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();

        if word_len > max_chars {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let chars: Vec<char> = word.chars().collect();
            for piece in chars.chunks(max_chars) {
                chunks.push(piece.iter().collect());
            }
            continue;
        }

        if current.is_empty() {
            current.push_str(word);
            current_len = word_len;
        } else if current_len + 1 + word_len > max_chars {
            chunks.push(std::mem::replace(&mut current, word.to_string()));
            current_len = word_len;
        } else {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}
