//! Build a flat playlist from the files in a directory.

use std::path::Path;
use std::time::SystemTime;

use tracing::{debug, info};
use walkdir::WalkDir;

use super::PlaylistWriter;
use crate::error::{Result, ResultExt};

/// Write a playlist of the regular files directly inside `dir`, oldest first.
///
/// Age is the creation time where the filesystem records one, otherwise the
/// modification time. Files of equal age are ordered by name. The output
/// playlist itself is never listed, even when it lives inside `dir`.
///
/// Returns the number of entries written.
pub fn create_from_directory(dir: &Path, output: &Path) -> Result<usize> {
    info!(path = %dir.display(), "Creating playlist from directory");

    let output_name = output.canonicalize().ok();
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry
            .map_err(std::io::Error::from)
            .with_context(format!("Failed to list {}", dir.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        if output_name.is_some() && entry.path().canonicalize().ok() == output_name {
            continue;
        }
        let Some(name) = entry.file_name().to_str() else {
            debug!(path = %entry.path().display(), "Skipping non UTF-8 file name");
            continue;
        };
        let age = entry
            .metadata()
            .ok()
            .and_then(|m| m.created().or_else(|_| m.modified()).ok())
            .unwrap_or(SystemTime::UNIX_EPOCH);
        files.push((name.to_string(), age));
    }

    let names = order_by_age(files);

    let mut writer = PlaylistWriter::create(output)?;
    for name in &names {
        debug!(file = %name, "Writing entry");
        writer.write_line(name)?;
    }

    info!(count = names.len(), output = %output.display(), "Playlist written");
    Ok(names.len())
}

/// Oldest first, then by name.
fn order_by_age(mut files: Vec<(String, SystemTime)>) -> Vec<String> {
    files.sort_by(|(a_name, a_age), (b_name, b_age)| {
        a_age.cmp(b_age).then_with(|| a_name.cmp(b_name))
    });
    files.into_iter().map(|(name, _)| name).collect()
}
