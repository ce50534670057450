use anyhow::{Context, Result};
use clap::Parser;
use readaloud::config::AppConfig;
use readaloud::ui::{self, AppState};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Read text aloud through an external speech synthesizer
#[derive(Parser, Debug)]
#[command(name = "readaloud", version, about)]
struct Args {
    /// Configuration file (defaults to <config dir>/readaloud/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Speech program to run instead of the configured one
    #[arg(long)]
    program: Option<String>,

    /// Initial speed in words per minute
    #[arg(long)]
    speed: Option<u32>,

    /// Initial pitch
    #[arg(long)]
    pitch: Option<u32>,

    /// Initial volume
    #[arg(long)]
    volume: Option<u32>,

    /// Text to place in the editor at startup
    text: Option<String>,
}

impl Args {
    fn into_config(self) -> Result<(AppConfig, Option<String>)> {
        let mut config = match &self.config {
            Some(path) => AppConfig::load(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => AppConfig::load_or_default().context("loading default configuration")?,
        };

        if let Some(program) = self.program {
            config = config.with_program(program);
        }
        if let Some(speed) = self.speed {
            config.voice.speed = speed;
        }
        if let Some(pitch) = self.pitch {
            config.voice.pitch = pitch;
        }
        if let Some(volume) = self.volume {
            config.voice.volume = volume;
        }

        config.validate()?;
        Ok((config, self.text))
    }
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "readaloud=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let (config, text) = Args::parse().into_config()?;
    info!("Starting ReadAloud with {}", config.engine.program);

    let mut state = AppState::new(&config);
    if let Some(text) = text {
        state.text = text;
    }
    state.check_dependency();

    ui::run(state).map_err(|e| anyhow::anyhow!("UI error: {}", e))
}
