use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{info, warn};

use alphabet_core::AlphabetTable;
use server::{build_router, config::ServerConfig, AppState};
use tts_core::{GoogleTranslateTts, SpeechGateway};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    async_main().await
}

async fn async_main() -> anyhow::Result<()> {
    info!("Starting alphabet/speech server...");

    let config = ServerConfig::from_env();

    let alphabet = match config.alphabet_data_path {
        Some(ref path) => AlphabetTable::from_path(path).or_else(|e| {
            warn!("Could not load {}: {e:#}, using embedded table.", path.display());
            AlphabetTable::embedded()
        })?,
        None => AlphabetTable::embedded()?,
    };
    info!("Loaded {} letter entries", alphabet.len());

    let provider = GoogleTranslateTts::with_base_url(&config.tts_base_url)
        .context("Failed to build speech provider client")?;
    let mut speech = SpeechGateway::new(Arc::new(provider)).with_timeout(config.synthesis_timeout());
    if let Some(ref dir) = config.audio_temp_dir {
        speech = speech.with_artifact_dir(dir);
    }
    info!(
        "Speech provider at {}, timeout={}s, artifacts in {}",
        config.tts_base_url,
        config.synthesis_timeout_secs,
        speech.artifact_dir().display()
    );

    let state = AppState {
        alphabet: Arc::new(alphabet),
        speech: Arc::new(speech),
    };
    let app = build_router(state, &config);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    let listener = TcpListener::bind(addr).await.map_err(|e| {
        anyhow::anyhow!("Failed to bind {addr}: {e}. Try a different PORT.")
    })?;

    info!("Server listening on http://{addr}");
    axum::serve(listener, app).await?;
    Ok(())
}
