//! Application-wide error types.
//!
//! Library modules return [`Result`] with the [`Error`] enum below, while
//! the CLI layer wraps everything in `anyhow` for convenient propagation.
//!
//! # Design
//!
//! - [`Error::Format`] and [`Error::Config`] are the two fatal kinds a user
//!   sees during reconciliation; both abort the run.
//! - [`Error::Interrupted`] is not a failure. The binary reports it and
//!   exits cleanly.
//! - Unreadable directories never show up here, the library probe turns
//!   them into empty listings.
//!
//! # Example
//!
//! ```ignore
//! use music_manager::error::{Error, Result};
//!
//! fn check(path: &Path) -> Result<()> {
//!     let lines = playlist::read_lines(path)?; // header errors auto-propagate
//!     Ok(())
//! }
//! ```

use std::path::PathBuf;

/// Application-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level application error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed playlist (bad header or entry)
    #[error("Invalid playlist {path}: {message}")]
    Format { path: PathBuf, message: String },

    /// Configuration error (conflicting paths, bad config values)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Tag reading error
    #[error("Metadata error for {path}: {message}")]
    Metadata { path: PathBuf, message: String },

    /// File organization error
    #[error("Organization error: {0}")]
    Organization(String),

    /// The interactive prompt could not be read
    #[error("Prompt error: {0}")]
    Prompt(String),

    /// The user cancelled the run
    #[error("Interrupted by user")]
    Interrupted,

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Create a format error.
    pub fn format(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Format {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a metadata error.
    pub fn metadata(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Metadata {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a config error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create an organization error.
    pub fn organization(message: impl Into<String>) -> Self {
        Self::Organization(message.into())
    }

    /// Create a prompt error.
    pub fn prompt(message: impl Into<String>) -> Self {
        Self::Prompt(message.into())
    }

    /// Add context to an error.
    pub fn context(self, ctx: impl Into<String>) -> Self {
        Self::WithContext {
            context: ctx.into(),
            source: Box::new(self),
        }
    }

    /// Whether this error (or the error it wraps) is a user interrupt.
    pub fn is_interrupt(&self) -> bool {
        match self {
            Self::Interrupted => true,
            Self::WithContext { source, .. } => source.is_interrupt(),
            _ => false,
        }
    }
}

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn with_context(self, ctx: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.context(ctx))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, std::io::Error> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Io(e).context(ctx))
    }
}
