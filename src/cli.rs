//! Command-line interface definitions and argument resolution.
//!
//! This module defines the arguments of both binaries using the
//! [clap](https://docs.rs/clap/) library. Helper methods accept a
//! [`FileConfig`] reference so that config-file values act as defaults that
//! CLI arguments can override (layered config).

use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::{Args, Parser};

use crate::config::{
    CleanOptions, DeletionPolicy, FileConfig, RelocateOptions, file::expand_tilde,
};
use crate::utils::parse_size;

/// Default threshold of `clean-small-dirs`.
pub const DEFAULT_CLEAN_SIZE: &str = "1G";

/// Output and logging flags shared by both binaries.
#[derive(Args, Debug)]
pub struct OutputArgs {
    /// Output results as a single JSON object for scripting/piping
    ///
    /// Replaces the per-directory lines and the summary with one JSON
    /// document on stdout.
    #[arg(long)]
    pub json: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short = 'q', long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl OutputArgs {
    /// The log level selected by the flags.
    ///
    /// JSON mode keeps stderr free of everything but errors.
    #[must_use]
    pub const fn log_level(&self) -> log::LevelFilter {
        if self.quiet || self.json {
            return log::LevelFilter::Error;
        }
        match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }

    /// Initialize `env_logger` at the selected level.
    pub fn init_logging(&self) {
        env_logger::Builder::new()
            .filter_level(self.log_level())
            .format_timestamp(None)
            .init();
    }
}

/// Arguments of `clean-small-dirs`.
#[derive(Parser, Debug)]
#[command(name = "clean-small-dirs")]
#[command(about = "Delete subdirectories smaller than a size threshold")]
#[command(version)]
pub struct CleanCli {
    /// Target directory whose subdirectories are measured (default: current)
    #[arg(short = 'd', long)]
    dir: Option<PathBuf>,

    /// Size threshold (e.g. 1G, 500M, 100K or a plain byte count)
    ///
    /// Units are binary: K = 1024, M = 1024², G = 1024³. A decimal number is
    /// allowed in front of a unit (1.5G). Defaults to 1G.
    #[arg(short = 's', long)]
    size: Option<String>,

    /// Only print, do not delete
    #[arg(long)]
    dry_run: bool,

    /// Output options
    #[command(flatten)]
    pub output: OutputArgs,
}

impl CleanCli {
    /// Resolve the target directory from CLI args, config file, or default.
    ///
    /// Priority: CLI argument > config file `[clean] dir` > current directory (`.`).
    /// Tilde expansion is applied to the path from the config file.
    #[must_use]
    pub fn directory(&self, config: &FileConfig) -> PathBuf {
        self.dir
            .clone()
            .or_else(|| config.clean.dir.as_deref().map(expand_tilde))
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// The size threshold string, before parsing.
    ///
    /// Priority: CLI argument > config file > `1G`.
    #[must_use]
    pub fn size(&self, config: &FileConfig) -> String {
        self.size
            .clone()
            .or_else(|| config.clean.size.clone())
            .unwrap_or_else(|| DEFAULT_CLEAN_SIZE.to_string())
    }

    /// Build the cleaner options from CLI args and config file.
    ///
    /// `dry_run` is set if either the flag or the config file enables it.
    /// The deletion policy comes from `[clean] ignore_file_errors`
    /// (default `true`).
    ///
    /// # Errors
    ///
    /// Returns an error if the size threshold cannot be parsed.
    pub fn clean_options(&self, config: &FileConfig) -> Result<CleanOptions> {
        Ok(CleanOptions {
            threshold: parse_size(&self.size(config))?,
            dry_run: self.dry_run || config.clean.dry_run.unwrap_or(false),
            policy: DeletionPolicy::from_ignore_file_errors(
                config.clean.ignore_file_errors.unwrap_or(true),
            ),
        })
    }
}

/// Arguments of `move-large-videos`.
#[derive(Parser, Debug)]
#[command(name = "move-large-videos")]
#[command(
    about = "Move first-level subdirectories that contain a video larger than 1 GiB into a target directory"
)]
#[command(version)]
pub struct RelocateCli {
    /// Source directory whose subdirectories are scanned
    pub source_dir: PathBuf,

    /// Target directory the subdirectories are moved into
    pub target_dir: PathBuf,

    /// Only show what would be moved
    #[arg(long)]
    dry_run: bool,

    /// Output options
    #[command(flatten)]
    pub output: OutputArgs,
}

impl RelocateCli {
    /// Build the relocator options from CLI args and config file.
    ///
    /// - **`dry_run`**: CLI flag `||` config value `||` `false`
    /// - **`min_video_size`**: config `[relocate] min_video_size` or 1 GiB
    /// - **`video_extensions`**: config `[relocate] video_extensions` or the
    ///   built-in list
    ///
    /// # Errors
    ///
    /// Returns an error if the configured `min_video_size` cannot be parsed
    /// or is negative.
    pub fn relocate_options(&self, config: &FileConfig) -> Result<RelocateOptions> {
        let mut options = RelocateOptions {
            dry_run: self.dry_run || config.relocate.dry_run.unwrap_or(false),
            ..RelocateOptions::default()
        };

        if let Some(size) = &config.relocate.min_video_size {
            let bytes = parse_size(size)?;
            let Ok(bytes) = u64::try_from(bytes) else {
                bail!("min_video_size must not be negative: {size}");
            };
            options.min_video_size = bytes;
        }

        if let Some(extensions) = &config.relocate.video_extensions {
            options = options.with_extensions(extensions);
        }

        Ok(options)
    }
}
