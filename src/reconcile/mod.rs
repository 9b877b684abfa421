//! Playlist reconciliation against the library on disk.
//!
//! Entries that still point at a file are passed through untouched. The
//! rest go through the [`Resolver`] and come out as corrected entries.
//! Output order always matches input order.
//!
//! [`reconcile_playlist`] is the file-level entry point used by the CLI:
//! it validates the whole input playlist before it creates the output, then
//! writes and flushes one entry at a time so an interrupted run leaves only
//! complete lines behind.

use std::path::PathBuf;

use tracing::{debug, info};

use crate::config::ensure_distinct;
use crate::error::{Error, Result};
use crate::library::Library;
use crate::playlist::{self, ManifestEntry, PlaylistWriter};
use crate::prompt::{Interaction, InterruptFlag};
use crate::resolver::Resolver;

/// Everything needed to reconcile one playlist file.
#[derive(Debug, Clone)]
pub struct ReconcileRequest {
    /// Library root the entries are relative to
    pub root: PathBuf,
    /// Playlist to check
    pub input: PathBuf,
    /// Where the corrected playlist is written
    pub output: PathBuf,
    /// Field delimiter used by both playlists
    pub delimiter: char,
    /// Sort menu candidates by name
    pub sort_candidates: bool,
}

/// What happened to one entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Entry already pointed at a file
    Unchanged,
    /// Entry was repaired
    Corrected,
}

/// Counts for a finished run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileSummary {
    pub total: usize,
    pub unchanged: usize,
    pub corrected: usize,
}

impl ReconcileSummary {
    fn record(&mut self, outcome: Outcome) {
        self.total += 1;
        match outcome {
            Outcome::Unchanged => self.unchanged += 1,
            Outcome::Corrected => self.corrected += 1,
        }
    }
}

/// Drives the resolver over a list of entries.
pub struct Reconciler<'a, P: Interaction + ?Sized> {
    library: &'a Library,
    prompt: &'a mut P,
    interrupt: InterruptFlag,
    delimiter: char,
}

impl<'a, P: Interaction + ?Sized> Reconciler<'a, P> {
    pub fn new(library: &'a Library, prompt: &'a mut P) -> Self {
        Self {
            library,
            prompt,
            interrupt: InterruptFlag::default(),
            delimiter: playlist::DEFAULT_DELIMITER,
        }
    }

    /// Delimiter of the playlist the entries are written to.
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Stop with [`Error::Interrupted`] before the next entry once `flag` is set.
    pub fn with_interrupt(mut self, flag: InterruptFlag) -> Self {
        self.interrupt = flag;
        self
    }

    /// Check or repair a single entry.
    pub fn reconcile_entry(&mut self, entry: &ManifestEntry) -> Result<(ManifestEntry, Outcome)> {
        if entry.is_valid(self.delimiter)
            && self
                .library
                .has_track(&entry.artist, &entry.album, &entry.filename)
        {
            debug!(entry = %entry.relative_path().display(), "Entry exists");
            return Ok((entry.clone(), Outcome::Unchanged));
        }

        info!(
            entry = %entry.relative_path().display(),
            path = %self.library.root().join(entry.relative_path()).display(),
            "Entry does not exist"
        );
        let resolved = Resolver::new(self.library, &mut *self.prompt)
            .with_delimiter(self.delimiter)
            .resolve(entry)?;
        Ok((resolved, Outcome::Corrected))
    }

    /// Reconcile `entries` in order, handing each finished entry to `sink`.
    pub fn run<F>(&mut self, entries: &[ManifestEntry], mut sink: F) -> Result<ReconcileSummary>
    where
        F: FnMut(&ManifestEntry) -> Result<()>,
    {
        let mut summary = ReconcileSummary::default();
        for entry in entries {
            if self.interrupt.is_set() {
                return Err(Error::Interrupted);
            }
            let (resolved, outcome) = self.reconcile_entry(entry)?;
            sink(&resolved)?;
            summary.record(outcome);
        }
        Ok(summary)
    }
}

/// Reconcile entries in memory and return the corrected list.
pub fn reconcile<P: Interaction + ?Sized>(
    library: &Library,
    entries: &[ManifestEntry],
    prompt: &mut P,
) -> Result<Vec<ManifestEntry>> {
    let mut corrected = Vec::with_capacity(entries.len());
    Reconciler::new(library, prompt).run(entries, |entry| {
        corrected.push(entry.clone());
        Ok(())
    })?;
    Ok(corrected)
}

/// Reconcile a playlist file into a new playlist file.
pub fn reconcile_playlist<P: Interaction + ?Sized>(
    request: &ReconcileRequest,
    prompt: &mut P,
    interrupt: InterruptFlag,
) -> Result<ReconcileSummary> {
    ensure_distinct(&request.input, &request.output, "Input and output playlists")?;

    info!(root = %request.root.display(), "Processing root");
    info!(input = %request.input.display(), output = %request.output.display(), "Reconciling playlist");

    let entries = playlist::read_entries(&request.input, request.delimiter)?;
    let library = Library::new(&request.root).with_sorted_listings(request.sort_candidates);

    let mut writer = PlaylistWriter::create(&request.output)?;
    let summary = Reconciler::new(&library, prompt)
        .with_interrupt(interrupt)
        .with_delimiter(request.delimiter)
        .run(&entries, |entry| writer.write_entry(entry, request.delimiter))?;

    info!(
        total = summary.total,
        unchanged = summary.unchanged,
        corrected = summary.corrected,
        "Playlist reconciled"
    );
    Ok(summary)
}
