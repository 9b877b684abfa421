//! Music Manager - keeps m3u playlists in sync with a music library.
//!
//! The library is laid out as `artist/album/file`. Tools are provided to
//! build a playlist from a flat folder, copy that folder into the
//! artist/album layout, and repair playlists whose entries no longer
//! match the files on disk.

pub mod cli;
pub mod config;
pub mod error;
pub mod library;
pub mod metadata;
pub mod organizer;
pub mod playlist;
pub mod prompt;
pub mod reconcile;
pub mod resolver;
#[cfg(test)]
pub mod test_utils;

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    init_logging(args.verbose, args.logfile.as_deref())?;

    cli::run_command(&args)
}

/// Initialize logging: `-v` raises the level, `RUST_LOG` overrides it.
fn init_logging(verbosity: u8, logfile: Option<&Path>) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("music_manager={}", level_for(verbosity))));

    match logfile {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .with(filter)
                .init();
        }
        None => {
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_writer(std::io::stderr),
                )
                .with(filter)
                .init();
        }
    }
    Ok(())
}

fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(level_for(0), "warn");
        assert_eq!(level_for(1), "info");
        assert_eq!(level_for(2), "debug");
        assert_eq!(level_for(9), "trace");
    }
}
