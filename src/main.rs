use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::str::FromStr;
use sttkit_core::AppConfig;
use sttkit_engine::{EngineFactory, EngineKind, SttEngine};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sttkit", about = "Speech recognition engine runner")]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Engine to use (whisper/vosk/dummy)
    #[arg(long)]
    engine: Option<String>,

    /// Path to the model resource
    #[arg(long)]
    model: Option<PathBuf>,

    /// Language code
    #[arg(long)]
    language: Option<String>,

    /// Input sample rate in Hz
    #[arg(long)]
    sample_rate: Option<u32>,

    /// Input channel count
    #[arg(long)]
    channels: Option<u16>,

    /// Input bit depth per sample
    #[arg(long)]
    bits_per_sample: Option<u16>,

    /// Log filter, overrides the config file
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from_file(path)
            .with_context(|| format!("failed to load config from {path:?}"))?,
        None => AppConfig::default(),
    };

    // Flags override file values
    if let Some(engine) = cli.engine {
        config.engine = engine;
    }
    if let Some(model) = cli.model {
        config.speech.model_path = model;
    }
    if let Some(language) = cli.language {
        config.speech.language = language;
    }
    if let Some(rate) = cli.sample_rate {
        config.audio.sample_rate = rate;
    }
    if let Some(channels) = cli.channels {
        config.audio.channels = channels;
    }
    if let Some(bits) = cli.bits_per_sample {
        config.audio.bits_per_sample = bits;
    }
    if let Some(level) = cli.log_level {
        config.general.log_level = level;
    }

    let env_filter =
        EnvFilter::try_new(&config.general.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::info!("sttkit speech recognition module starting");

    let kind = EngineKind::from_str(&config.engine)
        .map_err(|e| anyhow::anyhow!("{e} (expected whisper, vosk or dummy)"))?;

    let available = EngineFactory::available_kinds();
    if !available.contains(&kind) {
        let names: Vec<String> = available.iter().map(|k| k.to_string()).collect();
        bail!(
            "engine '{kind}' is not available in this build (available: {})",
            names.join(", "),
        );
    }

    let mut engine = EngineFactory::create(kind)
        .with_context(|| format!("failed to construct engine '{kind}'"))?;

    tracing::info!(
        engine = kind.display_name(),
        language = %config.speech.language,
        model = %config.speech.model_path.display(),
        sample_rate = config.audio.sample_rate,
        channels = config.audio.channels,
        bits_per_sample = config.audio.bits_per_sample,
        "configuration"
    );

    engine
        .initialize(config.speech.clone(), config.audio.clone())
        .await
        .context("failed to initialize engine")?;
    tracing::info!(engine = engine.name(), "engine initialized");

    let mut results = engine
        .start_recognition()
        .context("failed to start recognition")?;
    let printer = tokio::spawn(async move {
        while let Some(result) = results.recv().await {
            tracing::info!(
                is_final = result.is_final,
                confidence = result.confidence,
                timestamp = result.timestamp,
                "{}",
                result.text,
            );
        }
    });

    tracing::info!("recognizing, press Ctrl+C to stop");
    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for ctrl-c")?;

    tracing::info!("shutting down");
    engine
        .stop_recognition()
        .await
        .context("failed to stop recognition")?;
    let _ = printer.await;

    Ok(())
}
