//! CLI commands implementation.
//!
//! This module contains the CLI parser and dispatches to command-specific modules.

mod config_cmd;
mod play;
mod serve;
mod slides;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::{load_settings, LoadOptions, ProcessEnv};

#[derive(Parser)]
#[command(name = "glideshow")]
#[command(about = "Full-screen image carousel served from a Notion database")]
#[command(version)]
pub struct Cli {
    /// Config file path (overrides auto-discovery)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Slide interval in milliseconds (overrides SLIDE_INTERVAL_MS)
    #[arg(long, global = true)]
    interval_ms: Option<u64>,

    /// Use the built-in slides without contacting Notion
    #[arg(long, global = true)]
    no_remote: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web server (carousel page and /api/slides)
    Serve {
        /// Address to bind to: PORT, HOST, or HOST:PORT (default: 127.0.0.1:3030)
        bind: Option<String>,
    },

    /// Fetch slides through the Notion adapter and print them
    Slides {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Play the carousel in the terminal against a running server
    Play {
        /// Server URL (e.g., http://localhost:3030)
        #[arg(long, short, env = "GLIDESHOW_URL", default_value = "http://127.0.0.1:3030")]
        url: String,

        /// Stop after this many full passes through the slides
        #[arg(long)]
        cycles: Option<usize>,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the resolved configuration (file, environment and flags)
    Show,
}

pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let options = LoadOptions {
        config_path: cli.config,
    };
    let mut settings = load_settings(&options, &ProcessEnv).await?;

    // CLI flags win over file and environment
    if let Some(ms) = cli.interval_ms {
        if ms == 0 {
            anyhow::bail!("--interval-ms must be positive");
        }
        settings.carousel.interval = std::time::Duration::from_millis(ms);
    }
    if cli.no_remote {
        settings.carousel.remote_enabled = false;
    }

    match cli.command {
        Commands::Serve { bind } => {
            let bind = bind.unwrap_or_else(|| settings.server.bind.clone());
            serve::cmd_serve(settings, &bind).await
        }
        Commands::Slides { json } => slides::cmd_slides(&settings, json).await,
        Commands::Play { url, cycles } => play::cmd_play(&settings, &url, cycles).await,
        Commands::Config { command } => match command {
            ConfigCommands::Show => config_cmd::cmd_config_show(&settings),
        },
    }
}
