//! Command-line interface for music-manager.
//!
//! This module provides the commands for building, organizing and
//! repairing playlists.

mod commands;

pub use commands::{Cli, Commands, run_command};
