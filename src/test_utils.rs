//! Test utilities and fixtures for music-manager tests.
//!
//! [`LibraryFixture`] builds a throwaway `artist/album/file` tree in a
//! temporary directory that is removed when the fixture is dropped.
//!
//! # Example
//!
//! ```ignore
//! use crate::test_utils::LibraryFixture;
//!
//! let fixture = LibraryFixture::new()
//!     .track("BandA", "Album1", "track1.mp3")
//!     .album("BandB", "Live");
//! let library = fixture.library();
//! assert!(library.has_track("BandA", "Album1", "track1.mp3"));
//! ```

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::library::Library;
use crate::playlist::M3U_HEADER;

/// A temporary music library plus a scratch area for playlists.
pub struct LibraryFixture {
    dir: TempDir,
}

impl LibraryFixture {
    /// Creates an empty library under `<tmp>/library`.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        std::fs::create_dir(dir.path().join("library")).expect("Failed to create library root");
        Self { dir }
    }

    /// Adds an artist directory.
    pub fn artist(self, artist: &str) -> Self {
        std::fs::create_dir_all(self.root().join(artist)).expect("Failed to create artist");
        self
    }

    /// Adds an album directory (and its artist).
    pub fn album(self, artist: &str, album: &str) -> Self {
        std::fs::create_dir_all(self.root().join(artist).join(album))
            .expect("Failed to create album");
        self
    }

    /// Adds a track file (and its artist and album).
    pub fn track(self, artist: &str, album: &str, filename: &str) -> Self {
        let album_dir = self.root().join(artist).join(album);
        std::fs::create_dir_all(&album_dir).expect("Failed to create album");
        std::fs::write(album_dir.join(filename), b"fake audio").expect("Failed to create track");
        self
    }

    /// The library root.
    pub fn root(&self) -> PathBuf {
        self.dir.path().join("library")
    }

    /// A sorted-listing probe over the library root.
    pub fn library(&self) -> Library {
        Library::new(self.root())
    }

    /// A path outside the library root for playlists and other output.
    pub fn scratch(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Writes a playlist with the standard header followed by `lines`.
    pub fn write_playlist(&self, name: &str, lines: &[&str]) -> PathBuf {
        let path = self.scratch(name);
        let mut contents = format!("{}\n", M3U_HEADER);
        for line in lines {
            contents.push_str(line);
            contents.push('\n');
        }
        std::fs::write(&path, contents).expect("Failed to write playlist");
        path
    }

    /// Reads a file written during the test.
    pub fn read(&self, path: &Path) -> String {
        std::fs::read_to_string(path).expect("Failed to read file")
    }
}

impl Default for LibraryFixture {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_builds_tree() {
        let fixture = LibraryFixture::new()
            .artist("Solo")
            .track("BandA", "Album1", "track1.mp3");

        assert!(fixture.root().join("Solo").is_dir());
        assert!(fixture.root().join("BandA/Album1/track1.mp3").is_file());
    }

    #[test]
    fn test_write_playlist_has_header() {
        let fixture = LibraryFixture::new();
        let path = fixture.write_playlist("in.m3u", &["a/b/c.mp3"]);

        assert_eq!(fixture.read(&path), "#EXTM3U\na/b/c.mp3\n");
        assert!(!path.starts_with(fixture.root()));
    }
}
