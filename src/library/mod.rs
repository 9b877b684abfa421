//! Read-only view of a music library laid out as `root/artist/album/file`.
//!
//! The probe answers existence and listing questions and never fails: a
//! missing or unreadable directory lists as empty. Listings are re-read on
//! every call, nothing is cached.

use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

/// The library root all playlist entries are resolved against.
#[derive(Debug, Clone)]
pub struct Library {
    root: PathBuf,
    sorted: bool,
}

impl Library {
    /// Library with name-sorted listings.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            sorted: true,
        }
    }

    /// Choose whether listings are sorted by name or left in directory order.
    pub fn with_sorted_listings(mut self, sorted: bool) -> Self {
        self.sorted = sorted;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn artist_path(&self, artist: &str) -> PathBuf {
        self.root.join(artist)
    }

    pub fn album_path(&self, artist: &str, album: &str) -> PathBuf {
        self.root.join(artist).join(album)
    }

    pub fn track_path(&self, artist: &str, album: &str, filename: &str) -> PathBuf {
        self.root.join(artist).join(album).join(filename)
    }

    pub fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    pub fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    pub fn has_artist(&self, artist: &str) -> bool {
        self.is_dir(&self.artist_path(artist))
    }

    pub fn has_album(&self, artist: &str, album: &str) -> bool {
        self.is_dir(&self.album_path(artist, album))
    }

    pub fn has_track(&self, artist: &str, album: &str, filename: &str) -> bool {
        self.is_file(&self.track_path(artist, album, filename))
    }

    /// Names of the regular files directly inside `dir`.
    pub fn list_files(&self, dir: &Path) -> Vec<String> {
        self.list(dir, |entry| entry.file_type().is_file())
    }

    /// Names of the directories directly inside `dir`.
    pub fn list_directories(&self, dir: &Path) -> Vec<String> {
        self.list(dir, |entry| entry.file_type().is_dir())
    }

    fn list(&self, dir: &Path, keep: impl Fn(&walkdir::DirEntry) -> bool) -> Vec<String> {
        if !dir.is_dir() {
            return Vec::new();
        }

        // follow_links so a symlinked album or track counts like the real thing
        let mut names: Vec<String> = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| match e {
                Ok(entry) => Some(entry),
                Err(err) => {
                    debug!(dir = %dir.display(), error = %err, "Skipping unreadable entry");
                    None
                }
            })
            .filter(|e| keep(e))
            .filter_map(|e| e.file_name().to_str().map(str::to_string))
            .collect();

        if self.sorted {
            names.sort();
        }
        names
    }
}
