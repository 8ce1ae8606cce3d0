// Configuration for the server, read from the environment

use std::path::PathBuf;
use std::time::Duration;

use tracing::warn;
use tts_core::GOOGLE_TTS_BASE_URL;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub request_timeout_secs: u64,
    pub synthesis_timeout_secs: u64,
    pub cors_allowed_origins: Option<Vec<String>>,
    /// Alphabet table file; the embedded seed table is used when unset.
    pub alphabet_data_path: Option<PathBuf>,
    /// Where temporary audio files go; the OS temp dir when unset.
    pub audio_temp_dir: Option<PathBuf>,
    pub tts_base_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8085,
            request_timeout_secs: 60,
            synthesis_timeout_secs: 30,
            cors_allowed_origins: None,
            alphabet_data_path: None,
            audio_temp_dir: None,
            tts_base_url: GOOGLE_TTS_BASE_URL.to_string(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key -> value source. Unparseable numbers fall back to defaults.
    /// The request timeout is never shorter than the synthesis timeout.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let host = non_empty("HOST").unwrap_or(defaults.host);

        let port = lookup("PORT")
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.port);

        let mut request_timeout_secs = lookup("REQUEST_TIMEOUT_SECS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.request_timeout_secs);

        let synthesis_timeout_secs = lookup("SYNTHESIS_TIMEOUT_SECS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.synthesis_timeout_secs);

        // the request timeout has to cover the synthesis timeout
        if request_timeout_secs < synthesis_timeout_secs {
            warn!(
                request_timeout_secs,
                synthesis_timeout_secs,
                "REQUEST_TIMEOUT_SECS is below SYNTHESIS_TIMEOUT_SECS, raising it"
            );
            request_timeout_secs = synthesis_timeout_secs;
        }

        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS").map(|origins| {
            origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        });

        let alphabet_data_path = non_empty("ALPHABET_DATA_PATH").map(PathBuf::from);
        let audio_temp_dir = non_empty("AUDIO_TEMP_DIR").map(PathBuf::from);
        let tts_base_url = non_empty("TTS_BASE_URL").unwrap_or(defaults.tts_base_url);

        Self {
            host,
            port,
            request_timeout_secs,
            synthesis_timeout_secs,
            cors_allowed_origins,
            alphabet_data_path,
            audio_temp_dir,
            tts_base_url,
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn synthesis_timeout(&self) -> Duration {
        Duration::from_secs(self.synthesis_timeout_secs)
    }
}
