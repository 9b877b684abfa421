//! Audio file tag reading.
//!
//! Uses the lofty crate for format-independent metadata access. Only the
//! artist and album are needed: they decide where a file lands in the
//! `artist/album/` tree.
//!
//! Callers go through the [`TagReader`] trait so tests can supply tags
//! without real audio files.

use std::path::Path;

use lofty::file::TaggedFileExt;
use lofty::probe::Probe;
use lofty::tag::Accessor;

use crate::error::{Error, Result};

/// Artist and album tags of one file; either may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtistAlbum {
    pub artist: Option<String>,
    pub album: Option<String>,
}

/// Source of artist/album tags.
pub trait TagReader {
    fn read_artist_and_album(&self, path: &Path) -> Result<ArtistAlbum>;
}

/// Reads tags from audio files with lofty.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoftyTags;

impl TagReader for LoftyTags {
    fn read_artist_and_album(&self, path: &Path) -> Result<ArtistAlbum> {
        if !is_audio_file(path) {
            let ext = path
                .extension()
                .map(|e| e.to_string_lossy().into_owned())
                .unwrap_or_default();
            return Err(Error::metadata(
                path,
                format!("unsupported extension {:?}", ext),
            ));
        }

        let tagged_file = Probe::open(path)
            .and_then(|probe| probe.read())
            .map_err(|e| Error::metadata(path, e.to_string()))?;

        // Get the primary tag, or fall back to the first available tag
        let tag = tagged_file
            .primary_tag()
            .or_else(|| tagged_file.first_tag());

        Ok(ArtistAlbum {
            artist: tag.and_then(|t| non_empty(t.artist().as_deref())),
            album: tag.and_then(|t| non_empty(t.album().as_deref())),
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Check if a path has an audio file extension
pub fn is_audio_file(path: &Path) -> bool {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_lowercase());
    matches!(ext.as_deref(), Some("mp3" | "flac" | "ogg" | "m4a" | "wav"))
}
