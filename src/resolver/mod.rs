//! Interactive repair of playlist entries that no longer point at a file.
//!
//! An entry is fixed one component at a time: first the artist directory,
//! then the album directory, then the file name. Each stage loops until its
//! component exists on disk. Later stages can send the user back to an
//! earlier one ("change artist", "change album"), in which case that
//! earlier stage runs again before the later stage carries on.
//!
//! Track names get one automatic rule: if exactly one file in the album
//! ends with the wanted name (ignoring case), it is taken without asking.
//! Artists and albums are always confirmed by the user.
//!
//! Every component must also be writable as one field of a playlist line.
//! Typed artist names that are not (`BandB/`, `..`, names holding the
//! delimiter) are asked for again, and listed albums or files that are not
//! never appear in a menu.

pub mod fuzzy;

use tracing::{debug, info, warn};

use crate::error::Result;
use crate::library::Library;
use crate::playlist::{DEFAULT_DELIMITER, ManifestEntry, is_valid_component};
use crate::prompt::Interaction;

/// The entry being repaired.
///
/// Owned by one [`Resolver::resolve`] call, never shared across entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionContext {
    pub artist: String,
    pub album: String,
    pub filename: String,
    /// File name as it appeared in the playlist
    pub original_filename: String,
}

impl ResolutionContext {
    pub fn new(entry: &ManifestEntry) -> Self {
        Self {
            artist: entry.artist.clone(),
            album: entry.album.clone(),
            filename: entry.filename.clone(),
            original_filename: entry.filename.clone(),
        }
    }

    pub fn into_entry(self) -> ManifestEntry {
        ManifestEntry::new(self.artist, self.album, self.filename)
    }
}

/// Menu entries that send the user back to an earlier stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    ChangeArtist,
    ChangeAlbum,
}

impl Action {
    fn label(self) -> &'static str {
        match self {
            Action::ChangeArtist => "[Change artist]",
            Action::ChangeAlbum => "[Change album]",
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Selection {
    Action(Action),
    Candidate(String),
}

/// Numbered menu: actions first, then candidates in listing order.
struct Menu {
    actions: &'static [Action],
    candidates: Vec<String>,
}

impl Menu {
    fn new(actions: &'static [Action], candidates: Vec<String>) -> Self {
        Self {
            actions,
            candidates,
        }
    }

    fn len(&self) -> usize {
        self.actions.len() + self.candidates.len()
    }

    fn keys(&self) -> Vec<String> {
        (0..self.len()).map(|i| i.to_string()).collect()
    }

    fn lines(&self) -> Vec<String> {
        let labels = self
            .actions
            .iter()
            .map(|a| a.label())
            .chain(self.candidates.iter().map(String::as_str));
        labels
            .enumerate()
            .map(|(i, label)| format!("{}: {}", i, label))
            .collect()
    }

    fn select(&self, key: &str) -> Option<Selection> {
        let index: usize = key.trim().parse().ok()?;
        if let Some(action) = self.actions.get(index) {
            return Some(Selection::Action(*action));
        }
        self.candidates
            .get(index - self.actions.len())
            .cloned()
            .map(Selection::Candidate)
    }
}

/// Walks the user through fixing one entry at a time.
pub struct Resolver<'a, P: Interaction + ?Sized> {
    library: &'a Library,
    prompt: &'a mut P,
    delimiter: char,
}

impl<'a, P: Interaction + ?Sized> Resolver<'a, P> {
    pub fn new(library: &'a Library, prompt: &'a mut P) -> Self {
        Self {
            library,
            prompt,
            delimiter: DEFAULT_DELIMITER,
        }
    }

    /// Delimiter of the playlist the resolved entries are written to.
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Repair `entry` so that it names an existing file.
    ///
    /// Runs the artist, album and file stages in order. The returned entry
    /// always resolves to a regular file under the library root and
    /// round-trips through a playlist line with this resolver's delimiter.
    pub fn resolve(&mut self, entry: &ManifestEntry) -> Result<ManifestEntry> {
        let mut ctx = ResolutionContext::new(entry);
        self.resolve_artist(&mut ctx)?;
        self.resolve_album(&mut ctx)?;
        self.resolve_filename(&mut ctx)?;
        debug!(from = ?entry, to = ?ctx, "Entry resolved");
        Ok(ctx.into_entry())
    }

    /// Ask for a new artist name until one exists and can be written.
    pub fn resolve_artist(&mut self, ctx: &mut ResolutionContext) -> Result<()> {
        loop {
            let message = if !self.usable(&ctx.artist) {
                warn!(
                    artist = %ctx.artist,
                    delimiter = %self.delimiter,
                    "Artist cannot be written to the playlist"
                );
                format!(
                    "Artist \"{}\" cannot be used in a playlist entry, enter artist",
                    ctx.artist
                )
            } else if !self.library.has_artist(&ctx.artist) {
                warn!(
                    artist = %ctx.artist,
                    path = %self.library.artist_path(&ctx.artist).display(),
                    "Artist does not exist"
                );
                format!("Artist \"{}\" does not exist, enter artist", ctx.artist)
            } else {
                return Ok(());
            };
            ctx.artist = self.prompt.prompt_text(&message)?;
        }
    }

    /// Pick an album of the current artist until one exists.
    ///
    /// The artist must exist on entry; the user may replace it from the menu.
    pub fn resolve_album(&mut self, ctx: &mut ResolutionContext) -> Result<()> {
        while !self.usable(&ctx.album) || !self.library.has_album(&ctx.artist, &ctx.album) {
            info!(
                album = %ctx.album,
                path = %self.library.album_path(&ctx.artist, &ctx.album).display(),
                "Album does not exist"
            );

            let albums = self.albums_of(&ctx.artist);
            let message = format!(
                "Album \"{}\" in artist \"{}\" for filename \"{}\" does not exist, enter album",
                ctx.album, ctx.artist, ctx.original_filename
            );

            match self.choose(Menu::new(&[Action::ChangeArtist], albums), &message)? {
                Selection::Action(_) => self.change_artist(ctx)?,
                Selection::Candidate(album) => ctx.album = album,
            }
        }
        Ok(())
    }

    /// Find the track file, automatically when the name is unambiguous.
    ///
    /// Artist and album must exist on entry; either may be replaced from the
    /// menu, after which the album stage runs again.
    pub fn resolve_filename(&mut self, ctx: &mut ResolutionContext) -> Result<()> {
        while !self.usable(&ctx.filename)
            || !self
                .library
                .has_track(&ctx.artist, &ctx.album, &ctx.filename)
        {
            let album_dir = self.library.album_path(&ctx.artist, &ctx.album);
            warn!(
                filename = %ctx.filename,
                path = %album_dir.join(&ctx.filename).display(),
                "File does not exist"
            );

            let files = self.writable(self.library.list_files(&album_dir));
            let matches = fuzzy::match_by_suffix(&ctx.filename, &files);
            if let [found] = matches.as_slice() {
                info!(
                    "Automatically found {} as {}",
                    ctx.original_filename, found
                );
                ctx.filename = found.to_string();
                continue;
            }

            let message = format!(
                "File \"{}\" in artist \"{}\" and album \"{}\" does not exist, enter filename",
                ctx.filename, ctx.artist, ctx.album
            );

            let menu = Menu::new(&[Action::ChangeArtist, Action::ChangeAlbum], files);
            match self.choose(menu, &message)? {
                Selection::Action(Action::ChangeArtist) => {
                    // a new artist almost never has the old album
                    self.change_artist(ctx)?;
                    self.resolve_album(ctx)?;
                }
                Selection::Action(Action::ChangeAlbum) => {
                    self.pick_album(ctx)?;
                    self.resolve_album(ctx)?;
                }
                Selection::Candidate(filename) => ctx.filename = filename,
            }
        }
        Ok(())
    }

    fn change_artist(&mut self, ctx: &mut ResolutionContext) -> Result<()> {
        ctx.artist = self
            .prompt
            .prompt_text(&format!("Enter artist to replace \"{}\"", ctx.artist))?;
        self.resolve_artist(ctx)
    }

    /// Album list without the "change artist" entry.
    ///
    /// The current album exists and is usable, so the list is never empty.
    fn pick_album(&mut self, ctx: &mut ResolutionContext) -> Result<()> {
        let albums = self.albums_of(&ctx.artist);
        let message = format!("Enter album to replace \"{}\"", ctx.album);
        if let Selection::Candidate(album) = self.choose(Menu::new(&[], albums), &message)? {
            ctx.album = album;
        }
        Ok(())
    }

    fn usable(&self, name: &str) -> bool {
        is_valid_component(name, self.delimiter)
    }

    fn albums_of(&self, artist: &str) -> Vec<String> {
        let albums = self
            .library
            .list_directories(&self.library.artist_path(artist));
        self.writable(albums)
    }

    /// Drop listed names that would not survive a write and re-read.
    fn writable(&self, names: Vec<String>) -> Vec<String> {
        names
            .into_iter()
            .filter(|name| {
                let keep = self.usable(name);
                if !keep {
                    info!(candidate = %name, delimiter = %self.delimiter, "Skipping candidate");
                }
                keep
            })
            .collect()
    }

    fn choose(&mut self, menu: Menu, message: &str) -> Result<Selection> {
        for line in menu.lines() {
            self.prompt.display(&line);
        }
        let keys = menu.keys();
        loop {
            let answer = self.prompt.prompt_choice(message, &keys)?;
            if let Some(selection) = menu.select(&answer) {
                return Ok(selection);
            }
            debug!(answer = %answer, "Ignoring answer outside the menu");
        }
    }
}
