//! Sorting a flat music folder into an `artist/album/` tree.
//!
//! Input is a flat playlist of file names relative to a source root (as
//! written by `create-playlist`). Every file is copied to
//! `new_root/<artist>/<album>/<file>` using its tags, and a library
//! playlist with `artist<D>album<D>file` entries is written alongside.
//! Source files are never modified.
//!
//! # Features
//! - Artist and album names are made safe for use as directory names
//! - Dry-run mode to see the planned copies before touching anything
//! - Fails on the first file without an artist or album tag

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::ensure_distinct;
use crate::error::{Error, Result, ResultExt};
use crate::metadata::TagReader;
use crate::playlist::{self, ManifestEntry, PlaylistWriter};

/// Everything needed to organize one flat playlist.
#[derive(Debug, Clone)]
pub struct OrganizeRequest {
    /// Flat folder the input playlist is relative to
    pub root: PathBuf,
    /// Root of the artist/album tree to build
    pub new_root: PathBuf,
    /// Flat playlist of file names
    pub input: PathBuf,
    /// Library playlist to write
    pub output: PathBuf,
    /// Field delimiter for the output playlist
    pub delimiter: char,
    /// Plan only, don't create directories, copy files or write the playlist
    pub dry_run: bool,
}

/// One file's move into the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedCopy {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub entry: ManifestEntry,
}

/// Work out where a flat playlist line goes, from its tags.
pub fn plan_copy<T: TagReader + ?Sized>(
    root: &Path,
    new_root: &Path,
    line: &str,
    delimiter: char,
    tags: &T,
) -> Result<PlannedCopy> {
    let source = root.join(line);
    let filename = Path::new(line)
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| Error::organization(format!("Entry {:?} has no file name", line)))?;
    if filename.contains(delimiter) {
        return Err(Error::organization(format!(
            "File name {:?} contains the playlist delimiter {:?}",
            filename, delimiter
        )));
    }

    let found = tags.read_artist_and_album(&source)?;
    let artist = found
        .artist
        .ok_or_else(|| Error::metadata(&source, "missing artist"))?;
    let album = found
        .album
        .ok_or_else(|| Error::metadata(&source, "missing album"))?;

    let artist = sanitize_logged(&artist, "artist");
    let album = sanitize_logged(&album, "album");
    if artist.contains(delimiter) || album.contains(delimiter) {
        return Err(Error::organization(format!(
            "Artist {:?} or album {:?} contains the playlist delimiter {:?}",
            artist, album, delimiter
        )));
    }

    let destination = new_root.join(&artist).join(&album).join(filename);
    Ok(PlannedCopy {
        source,
        destination,
        entry: ManifestEntry::new(artist, album, filename),
    })
}

/// Copy every file of a flat playlist into the artist/album tree.
///
/// Returns the copies made (or planned, for a dry run) in playlist order.
pub fn organize_playlist<T: TagReader + ?Sized>(
    request: &OrganizeRequest,
    tags: &T,
) -> Result<Vec<PlannedCopy>> {
    ensure_distinct(&request.input, &request.output, "Input and output playlists")?;
    ensure_distinct(&request.root, &request.new_root, "Original and new roots")?;

    info!(
        root = %request.root.display(),
        new_root = %request.new_root.display(),
        "Organizing into album folders"
    );

    let lines = playlist::read_lines(&request.input)?;

    let mut writer = if request.dry_run {
        None
    } else {
        Some(PlaylistWriter::create(&request.output)?)
    };

    let mut copies = Vec::with_capacity(lines.len());
    for line in &lines {
        debug!(file = %line, "Processing file");
        let plan = plan_copy(
            &request.root,
            &request.new_root,
            line,
            request.delimiter,
            tags,
        )?;

        if let Some(writer) = writer.as_mut() {
            copy_track(&plan)?;
            writer.write_entry(&plan.entry, request.delimiter)?;
        }
        debug!(
            entry = %plan.entry.to_line(request.delimiter),
            dry_run = request.dry_run,
            "Entry organized"
        );
        copies.push(plan);
    }

    info!(count = copies.len(), "Organize finished");
    Ok(copies)
}

fn copy_track(plan: &PlannedCopy) -> Result<()> {
    if let Some(parent) = plan.destination.parent() {
        fs::create_dir_all(parent)
            .with_context(format!("Failed to create directory {}", parent.display()))?;
    }
    fs::copy(&plan.source, &plan.destination).with_context(format!(
        "Failed to copy {} to {}",
        plan.source.display(),
        plan.destination.display()
    ))?;
    Ok(())
}

fn sanitize_logged(value: &str, field: &str) -> String {
    let sanitized = sanitize_component(value);
    if sanitized != value {
        info!(
            "Validation of {} with value \"{}\" failed, replacing by \"{}\"",
            field, value, sanitized
        );
    }
    sanitized
}

/// Make a tag value safe to use as a single directory name.
///
/// Separators and characters Windows rejects become `_`, control
/// characters are dropped, trailing dots and spaces are trimmed and
/// `.`/`..`/empty names become `_`.
pub fn sanitize_component(name: &str) -> String {
    let replaced: String = name
        .chars()
        .filter(|c| !c.is_control())
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            _ => c,
        })
        .collect();

    let trimmed = replaced.trim_end_matches(['.', ' ']).trim_start();
    if trimmed.is_empty() || trimmed == "." || trimmed == ".." {
        "_".to_string()
    } else {
        trimmed.to_string()
    }
}


/// Property-based tests using proptest
#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Sanitized names are a single, non-empty path component
        #[test]
        fn sanitize_gives_single_component(input in "\\PC{0,40}") {
            let sanitized = sanitize_component(&input);
            prop_assert!(!sanitized.is_empty());
            prop_assert!(!sanitized.contains('/'));
            prop_assert!(!sanitized.contains('\\'));
            prop_assert!(sanitized != "." && sanitized != "..");
            prop_assert_eq!(Path::new(&sanitized).components().count(), 1);
        }

        /// Names without special characters pass through unchanged
        #[test]
        fn sanitize_preserves_plain_names(input in "[A-Za-z0-9][A-Za-z0-9 _-]{0,30}[A-Za-z0-9]") {
            prop_assert_eq!(sanitize_component(&input), input);
        }
    }
}
