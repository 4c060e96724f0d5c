//! LINE bot server.
//!
//! # Usage
//!
//! ```bash
//! LINEBOT_CHANNEL__ACCESS_TOKEN=... cargo run --package linebot
//! cargo run --package linebot -- --config deploy/linebot.toml --log-level debug
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use linebot::runtime::LineBotRuntime;
use linebot::runtime::config::LogLevel;
use tracing::info;

/// LINE Messaging API webhook bot.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Configuration file (default: linebot.toml in the working or user config directory).
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Configuration profile (development, production, ...).
    #[arg(long, env = "LINEBOT_PROFILE")]
    profile: Option<String>,

    /// Overrides `logging.level`.
    #[arg(short, long, value_name = "LEVEL")]
    log_level: Option<LogLevel>,

    /// Overrides `server.port`.
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut builder = LineBotRuntime::builder();
    if let Some(path) = &cli.config {
        builder = builder.config_file(path);
    }
    if let Some(profile) = &cli.profile {
        builder = builder.profile(profile);
    }
    if let Some(level) = cli.log_level {
        builder = builder.set("logging.level", level);
    }
    if let Some(port) = cli.port {
        builder = builder.set("server.port", port);
    }

    let runtime = builder.build().context("failed to start the LINE bot")?;

    let server = &runtime.config().server;
    info!(addr = %server.bind_addr(), path = %server.path, "Starting LINE bot");

    runtime.run().await?;
    Ok(())
}
