//! CLI command definitions and dispatch.
//!
//! Each subcommand is implemented in its own submodule:
//! - `find_missing`: Repair a library playlist against the files on disk
//! - `organize`: Copy a flat folder into an artist/album tree
//! - `create`: Write a playlist from the files in a folder

mod create;
mod find_missing;
mod organize;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{self, Config, parse_delimiter};

pub use create::cmd_create_playlist;
pub use find_missing::cmd_find_missing;
pub use organize::cmd_organize;

/// Music Manager CLI
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbose output (repeat to increase verbosity)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Log to a file instead of the console
    #[arg(short, long, global = true)]
    pub logfile: Option<PathBuf>,

    /// Config file to use instead of the one in the OS config directory
    #[arg(long, global = true, env = "MUSIC_MANAGER_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Verify that every playlist entry exists, fixing the ones that don't
    FindMissing {
        /// Directory containing music organised as artist/album folders
        #[arg(short, long)]
        root: Option<PathBuf>,
        /// Playlist to check
        #[arg(short, long, default_value = "playlist.m3u")]
        input: PathBuf,
        /// Where the corrected playlist is written
        #[arg(short, long, default_value = "output.m3u")]
        output: PathBuf,
        /// Field delimiter between artist, album and file name
        #[arg(short, long)]
        delimiter: Option<String>,
    },
    /// Copy music into artist/album folders based on its tags
    Organize {
        /// Flat directory the input playlist is relative to
        #[arg(short, long, default_value = "Flat/")]
        root: PathBuf,
        /// Directory to build the artist/album tree in
        #[arg(short, long, default_value = "Sorted/")]
        new_root: PathBuf,
        /// Flat playlist of file names
        #[arg(short, long, default_value = "playlist.m3u")]
        input: PathBuf,
        /// Where the library playlist is written
        #[arg(short, long, default_value = "output.m3u")]
        output: PathBuf,
        /// Field delimiter between artist, album and file name
        #[arg(short, long)]
        delimiter: Option<String>,
        /// Dry run - show what would be done without copying anything
        #[arg(long)]
        dry_run: bool,
    },
    /// Create a playlist from the files in a directory, oldest first
    CreatePlaylist {
        /// Directory containing the files to add
        #[arg(short, long, default_value = ".")]
        path: PathBuf,
        /// Where the playlist is written
        #[arg(short, long, default_value = "playlist.m3u")]
        output: PathBuf,
    },
}

/// Run the specified CLI command.
pub fn run_command(cli: &Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => config::load_from(path),
        None => config::load(),
    };

    match &cli.command {
        Commands::FindMissing {
            root,
            input,
            output,
            delimiter,
        } => {
            let delimiter = resolve_delimiter(&config, delimiter.as_deref())?;
            let root = root
                .clone()
                .or_else(|| config.library.root.clone())
                .unwrap_or_else(|| PathBuf::from("."));
            cmd_find_missing(
                &root,
                input,
                output,
                delimiter,
                config.library.sort_candidates,
            )
        }
        Commands::Organize {
            root,
            new_root,
            input,
            output,
            delimiter,
            dry_run,
        } => {
            let delimiter = resolve_delimiter(&config, delimiter.as_deref())?;
            cmd_organize(root, new_root, input, output, delimiter, *dry_run)
        }
        Commands::CreatePlaylist { path, output } => cmd_create_playlist(path, output),
    }
}

/// Command-line delimiter wins over the config file.
fn resolve_delimiter(config: &Config, flag: Option<&str>) -> anyhow::Result<char> {
    let delimiter = match flag {
        Some(value) => parse_delimiter(value)?,
        None => config.playlist.delimiter()?,
    };
    Ok(delimiter)
}
