//! Command-line interface for nowplaying.
//!
//! Inspects tags and exports cover art for single sources or whole
//! directories.

mod commands;

pub use commands::{Cli, Commands, run_command};
