//! Configuration file support for default settings.
//!
//! This module provides support for loading configuration from a TOML file
//! located at `~/.config/dir-sweep/config.toml` (or the platform-specific
//! equivalent). Configuration file values serve as defaults that can be
//! overridden by CLI arguments. The tools only ever read this file.
//!
//! # Layering
//!
//! The precedence order is: **CLI argument > config file > hardcoded default**.
//!
//! # Example config
//!
//! ```toml
//! [clean]
//! dir = "~/Downloads"
//! size = "500M"
//! dry_run = false
//! ignore_file_errors = true   # default; set to false to report deletion failures
//!
//! [relocate]
//! min_video_size = "1G"
//! video_extensions = [".mp4", ".mkv", ".webm"]
//! dry_run = false
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Top-level configuration file structure.
///
/// All fields are `Option<T>` so we can detect which values are present in the
/// config file and apply layered configuration (CLI > config file > defaults).
#[derive(Deserialize, Default, Debug)]
pub struct FileConfig {
    /// Options for `clean-small-dirs`
    #[serde(default)]
    pub clean: FileCleanConfig,

    /// Options for `move-large-videos`
    #[serde(default)]
    pub relocate: FileRelocateConfig,
}

/// Cleaner options from the configuration file.
#[derive(Deserialize, Default, Debug)]
pub struct FileCleanConfig {
    /// Directory whose subdirectories are measured
    pub dir: Option<PathBuf>,

    /// Size threshold (e.g. `"500M"`)
    pub size: Option<String>,

    /// Whether to only report what would be deleted
    pub dry_run: Option<bool>,

    /// Whether individual removal failures are skipped. Defaults to `true`.
    pub ignore_file_errors: Option<bool>,
}

/// Relocator options from the configuration file.
#[derive(Deserialize, Default, Debug)]
pub struct FileRelocateConfig {
    /// Size a video must exceed to qualify (e.g. `"1G"`)
    pub min_video_size: Option<String>,

    /// File name endings that identify a video
    pub video_extensions: Option<Vec<String>>,

    /// Whether to only report what would be moved
    pub dry_run: Option<bool>,
}

/// Expand a leading `~` in a path to the user's home directory.
///
/// Paths that don't start with `~` are returned unchanged.
///
/// # Examples
///
/// ```
/// # use std::path::PathBuf;
/// # use dir_sweep::config::file::expand_tilde;
/// let absolute = PathBuf::from("/absolute/path");
/// assert_eq!(expand_tilde(&absolute), PathBuf::from("/absolute/path"));
/// ```
#[must_use]
pub fn expand_tilde(path: &Path) -> PathBuf {
    if let Ok(rest) = path.strip_prefix("~")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    path.to_path_buf()
}

impl FileConfig {
    /// Returns the path where the configuration file is expected.
    ///
    /// The configuration file is located at `<config_dir>/dir-sweep/config.toml`,
    /// where `<config_dir>` is the platform-specific configuration directory
    /// (e.g., `~/.config` on Linux, `%APPDATA%` on Windows).
    #[must_use]
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("dir-sweep").join("config.toml"))
    }

    /// Load configuration from the default config file location.
    ///
    /// If the config directory cannot be determined or the file doesn't
    /// exist, returns a default (empty) configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be read or
    /// contains invalid TOML.
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from an explicit path.
    ///
    /// A missing file yields the default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file at {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file at {}", path.display()))?;

        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }
}
