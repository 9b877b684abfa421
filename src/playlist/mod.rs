//! Playlist (m3u manifest) reading and writing.
//!
//! A manifest starts with the literal `#EXTM3U` header line. Every following
//! line is one entry. Library playlists hold `artist<D>album<D>filename`
//! triples, flat playlists (as written by [`create_from_directory`]) hold
//! bare filenames.
//!
//! With the default `/` delimiter an entry line is also a valid relative
//! path, so the playlist stays playable from the library root.

mod create;

pub use create::create_from_directory;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result, ResultExt};

/// First line of every playlist.
pub const M3U_HEADER: &str = "#EXTM3U";

/// Field delimiter used when none is configured.
pub const DEFAULT_DELIMITER: char = '/';

/// One `artist / album / filename` reference from a playlist.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ManifestEntry {
    pub artist: String,
    pub album: String,
    pub filename: String,
}

impl ManifestEntry {
    pub fn new(
        artist: impl Into<String>,
        album: impl Into<String>,
        filename: impl Into<String>,
    ) -> Self {
        Self {
            artist: artist.into(),
            album: album.into(),
            filename: filename.into(),
        }
    }

    /// Split a playlist line into its three fields.
    ///
    /// Returns `None` unless the line holds exactly three delimited parts.
    pub fn parse(line: &str, delimiter: char) -> Option<Self> {
        let mut parts = line.split(delimiter);
        let artist = parts.next()?;
        let album = parts.next()?;
        let filename = parts.next()?;
        if parts.next().is_some() {
            return None;
        }
        Some(Self::new(artist, album, filename))
    }

    /// Join the fields back into a playlist line (without newline).
    pub fn to_line(&self, delimiter: char) -> String {
        let mut line =
            String::with_capacity(self.artist.len() + self.album.len() + self.filename.len() + 2);
        line.push_str(&self.artist);
        line.push(delimiter);
        line.push_str(&self.album);
        line.push(delimiter);
        line.push_str(&self.filename);
        line
    }

    /// The entry as a path relative to the library root.
    pub fn relative_path(&self) -> PathBuf {
        [&self.artist, &self.album, &self.filename].iter().collect()
    }

    /// Whether every field is a usable component, see [`is_valid_component`].
    pub fn is_valid(&self, delimiter: char) -> bool {
        [&self.artist, &self.album, &self.filename]
            .iter()
            .all(|field| is_valid_component(field, delimiter))
    }
}

/// Whether `name` can be written as one field of an entry and read back.
///
/// The name must be a single directory entry (not empty, `.` or `..`, and
/// free of path separators) and must not contain the delimiter, control
/// characters or trailing whitespace, all of which change how the line
/// splits or trims on the next read.
pub fn is_valid_component(name: &str, delimiter: char) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.ends_with(char::is_whitespace)
        && !name
            .chars()
            .any(|c| c == delimiter || c.is_control() || std::path::is_separator(c))
}

/// Read a playlist and return its entry lines.
///
/// The header must match [`M3U_HEADER`] exactly. Trailing whitespace is
/// stripped from every line and blank lines are skipped.
pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    let contents = std::fs::read_to_string(path)
        .with_context(format!("Failed to read playlist {}", path.display()))?;

    let mut lines = contents.lines();
    match lines.next() {
        Some(header) if header == M3U_HEADER => {}
        _ => {
            return Err(Error::format(
                path,
                format!("does not start with the {} header", M3U_HEADER),
            ));
        }
    }

    Ok(lines
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// Read a library playlist and parse every entry up front.
///
/// A single malformed line fails the whole read, so callers never start
/// writing output for a playlist that can't be processed completely.
pub fn read_entries(path: &Path, delimiter: char) -> Result<Vec<ManifestEntry>> {
    read_lines(path)?
        .into_iter()
        .enumerate()
        .map(|(index, line)| {
            ManifestEntry::parse(&line, delimiter).ok_or_else(|| {
                Error::format(
                    path,
                    format!(
                        "entry {} ({:?}) does not have three parts separated by {:?}",
                        index + 1,
                        line,
                        delimiter
                    ),
                )
            })
        })
        .collect()
}

/// Writes a playlist one line at a time, flushing after every line.
///
/// If the run stops half way, the file holds the header plus every entry
/// that was completed.
pub struct PlaylistWriter<W: Write> {
    inner: W,
    written: usize,
}

impl PlaylistWriter<BufWriter<File>> {
    /// Create (or truncate) a playlist file and write the header.
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)
            .with_context(format!("Failed to create playlist {}", path.display()))?;
        Self::new(BufWriter::new(file))
    }
}

impl<W: Write> PlaylistWriter<W> {
    /// Wrap a writer and emit the header.
    pub fn new(mut inner: W) -> Result<Self> {
        writeln!(inner, "{}", M3U_HEADER)?;
        inner.flush()?;
        Ok(Self { inner, written: 0 })
    }

    /// Write a raw line.
    pub fn write_line(&mut self, line: &str) -> Result<()> {
        writeln!(self.inner, "{}", line)?;
        self.inner.flush()?;
        self.written += 1;
        Ok(())
    }

    /// Write a library entry.
    pub fn write_entry(&mut self, entry: &ManifestEntry, delimiter: char) -> Result<()> {
        self.write_line(&entry.to_line(delimiter))
    }

    /// Number of entry lines written so far.
    pub fn written(&self) -> usize {
        self.written
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}
