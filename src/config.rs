//! Configuration system using TOML files.
//!
//! Config is stored in the OS-standard config directory:
//! - Windows: %APPDATA%\music-manager\config.toml
//! - macOS: ~/Library/Application Support/music-manager/config.toml
//! - Linux: ~/.config/music-manager/config.toml
//!
//! Every setting has a default, so the file is optional. Command-line
//! flags override whatever the file says.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::playlist::DEFAULT_DELIMITER;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Playlist format settings
    pub playlist: PlaylistConfig,

    /// Library settings
    pub library: LibraryConfig,
}

/// Playlist format settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaylistConfig {
    /// Field delimiter between artist, album and filename (one character)
    pub delimiter: String,
}

impl Default for PlaylistConfig {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER.to_string(),
        }
    }
}

impl PlaylistConfig {
    /// The configured delimiter as a single character.
    pub fn delimiter(&self) -> Result<char> {
        parse_delimiter(&self.delimiter)
    }
}

/// Library settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryConfig {
    /// Default library root when `--root` is not given
    pub root: Option<PathBuf>,

    /// Sort directory listings by name so menus are reproducible
    pub sort_candidates: bool,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            root: None,
            sort_candidates: true,
        }
    }
}

/// Parse a delimiter string, which must be exactly one character.
pub fn parse_delimiter(value: &str) -> Result<char> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if !c.is_control() => Ok(c),
        _ => Err(Error::config(format!(
            "Delimiter must be a single printable character, got {:?}",
            value
        ))),
    }
}

/// Fail with a config error when `a` and `b` name the same file or directory.
///
/// Paths are compared after resolving `.`/`..` and symlinks where they
/// exist, so `out/../list.m3u` and `list.m3u` are caught too.
pub fn ensure_distinct(a: &Path, b: &Path, what: &str) -> Result<()> {
    if a == b || normalize(a) == normalize(b) {
        return Err(Error::config(format!(
            "{} are the same, {}, this is not supported",
            what,
            a.display()
        )));
    }
    Ok(())
}

/// Canonical form of a path whose last component may not exist yet.
fn normalize(path: &Path) -> PathBuf {
    if let Ok(canonical) = path.canonicalize() {
        return canonical;
    }
    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) => {
            let parent = if parent.as_os_str().is_empty() {
                Path::new(".")
            } else {
                parent
            };
            parent
                .canonicalize()
                .map(|p| p.join(name))
                .unwrap_or_else(|_| path.to_path_buf())
        }
        _ => path.to_path_buf(),
    }
}

// ============================================================================
// Config File Operations
// ============================================================================

/// Get the config directory path
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("music-manager"))
}

/// Get the full path to the config file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load configuration from the default location.
///
/// Returns default config if file doesn't exist or can't be parsed.
pub fn load() -> Config {
    match config_path() {
        Some(path) => load_from(&path),
        None => {
            tracing::warn!("Could not determine config directory, using defaults");
            Config::default()
        }
    }
}

/// Load configuration from an explicit path.
///
/// Logs warnings but doesn't fail - we always return a usable config.
pub fn load_from(path: &Path) -> Config {
    if !path.exists() {
        tracing::debug!("No config file found at {:?}, using defaults", path);
        return Config::default();
    }

    match std::fs::read_to_string(path) {
        Ok(contents) => match toml::from_str(&contents) {
            Ok(config) => {
                tracing::info!("Loaded config from {:?}", path);
                config
            }
            Err(e) => {
                tracing::error!("Failed to parse config file {:?}: {}", path, e);
                tracing::warn!("Using default configuration");
                Config::default()
            }
        },
        Err(e) => {
            tracing::error!("Failed to read config file {:?}: {}", path, e);
            Config::default()
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
