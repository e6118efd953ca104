//! CLI command definitions and dispatch.
//!
//! Each subcommand is implemented in its own submodule:
//! - `inspect`: show the now-playing card for one source
//! - `cover`: write the embedded cover art to disk
//! - `scan`: extract tags from every MP3 in a directory
//! - `config`: show or initialize the config file

mod config;
mod cover;
mod inspect;
mod scan;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tokio::runtime::Runtime;

pub use config::cmd_config;
pub use cover::cmd_cover;
pub use inspect::cmd_inspect;
pub use scan::cmd_scan;

use crate::config::{self as app_config, Config};
use crate::display::NowPlaying;

/// nowplaying CLI
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file (defaults to the OS config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// HTTP User-Agent (overrides the config file)
    #[arg(long, global = true, env = "NOWPLAYING_USER_AGENT")]
    pub user_agent: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Show title, artist and cover art for a file or URL
    Inspect {
        /// Path or http(s) URL of an MP3 file
        source: String,
        /// Bytes to read up front (default from config)
        #[arg(long)]
        limit: Option<usize>,
        /// Output JSON instead of text
        #[arg(long)]
        json: bool,
        /// Also print the cover art as a data URI
        #[arg(long)]
        data_uri: bool,
        /// Show fallback values instead of failing when the source can't be read
        #[arg(long)]
        placeholder_on_error: bool,
    },
    /// Write the embedded cover art to a directory
    Cover {
        /// Path or http(s) URL of an MP3 file
        source: String,
        /// Output directory
        #[arg(short, long, default_value = ".")]
        out: PathBuf,
        /// File name without extension (default: source file name)
        #[arg(short, long)]
        name: Option<String>,
    },
    /// Extract tags from every MP3 under a directory
    Scan {
        /// Directory (or single file) to scan
        path: PathBuf,
        /// Output JSON instead of text
        #[arg(long)]
        json: bool,
        /// Export each distinct cover image to this directory
        #[arg(long)]
        covers: Option<PathBuf>,
    },
    /// Show the effective configuration
    Config {
        /// Write the current configuration to the config file
        #[arg(long)]
        init: bool,
    },
}

/// Run the specified CLI command.
pub fn run_command(cli: &Cli) -> anyhow::Result<()> {
    let config = load_config(cli);
    let rt = Runtime::new()?;

    match &cli.command {
        Commands::Inspect {
            source,
            limit,
            json,
            data_uri,
            placeholder_on_error,
        } => cmd_inspect(
            &rt,
            &config,
            source,
            *limit,
            *json,
            *data_uri,
            *placeholder_on_error,
        ),
        Commands::Cover { source, out, name } => {
            cmd_cover(&rt, &config, source, out, name.as_deref())
        }
        Commands::Scan { path, json, covers } => {
            cmd_scan(&rt, &config, path, *json, covers.as_deref())
        }
        Commands::Config { init } => cmd_config(&config, cli.config.as_deref(), *init),
    }
}

fn load_config(cli: &Cli) -> Config {
    let mut config = match &cli.config {
        Some(path) => app_config::load_from(path),
        None => app_config::load(),
    };
    if let Some(user_agent) = &cli.user_agent {
        config.fetch.user_agent = user_agent.clone();
    }
    config
}

// ============================================================================
// Shared helper functions
// ============================================================================

/// Print the now-playing card as text
pub(crate) fn print_now_playing(now: &NowPlaying) {
    println!("Title:  {}", now.title);
    println!("Artist: {}", now.artist);
    match &now.cover {
        Some(cover) => println!("Cover:  {} ({})", cover.mime_type, format_bytes(cover.len())),
        None => println!("Cover:  none"),
    }
}

/// Human-readable byte count
pub(crate) fn format_bytes(bytes: usize) -> String {
    const KB: f64 = 1024.0;
    let b = bytes as f64;
    if b >= KB * KB {
        format!("{:.1} MB", b / (KB * KB))
    } else if b >= KB {
        format!("{:.1} KB", b / KB)
    } else {
        format!("{} B", bytes)
    }
}
