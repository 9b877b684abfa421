//! Playlist creation command.

use std::path::Path;

use crate::playlist;

/// Create a playlist from a directory, sorted by age
pub fn cmd_create_playlist(path: &Path, output: &Path) -> anyhow::Result<()> {
    let count = playlist::create_from_directory(path, output)?;
    println!("Wrote {} entries to {}", count, output.display());
    Ok(())
}
