//! # clean-small-dirs
//!
//! Deletes the immediate subdirectories of a directory whose total size is
//! below a threshold.
//!
//! ```bash
//! clean-small-dirs                         # current directory, threshold 1G
//! clean-small-dirs -d ~/Downloads -s 500M --dry-run
//! ```

use std::{fs, path::PathBuf, process::exit};

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use dir_sweep::{Cleaner, FileConfig, cli::CleanCli, output::JsonCleanOutput};

/// Entry point for clean-small-dirs.
///
/// Errors from [`inner_main`] are printed to stderr before exiting with a
/// non-zero status code.
fn main() {
    if let Err(err) = inner_main() {
        eprintln!("Error: {err}");

        exit(1);
    }
}

/// Parse arguments, resolve the target and threshold, then clean.
///
/// # Errors
///
/// Returns errors from size parsing, listing the target directory, or JSON
/// serialization.
fn inner_main() -> Result<()> {
    let args = CleanCli::parse();
    args.output.init_logging();

    let json_mode = args.output.json;
    let file_config = load_config(json_mode);

    let options = args.clean_options(&file_config)?;
    let dir = args.directory(&file_config);
    let base_path = fs::canonicalize(&dir).unwrap_or_else(|_| absolute_or(dir));

    if !base_path.is_dir() {
        println!("Error: {} is not a valid directory", base_path.display());
        exit(1);
    }

    log::info!(
        "Cleaning {} (threshold {} bytes{})",
        base_path.display(),
        options.threshold,
        if options.dry_run { ", dry run" } else { "" }
    );

    let threshold = options.threshold;
    let result = Cleaner::new(options)
        .with_quiet(json_mode)
        .clean(&base_path)?;

    if json_mode {
        let output = JsonCleanOutput::from_result(&base_path, threshold, &result);
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        Cleaner::print_summary(&result);
    }

    Ok(())
}

/// Make `path` absolute without requiring it to exist.
fn absolute_or(path: PathBuf) -> PathBuf {
    std::path::absolute(&path).unwrap_or(path)
}

/// Load the configuration file, falling back to defaults on failure.
fn load_config(json_mode: bool) -> FileConfig {
    match FileConfig::load() {
        Ok(config) => config,
        Err(e) => {
            if !json_mode {
                eprintln!("{} {e:#}", "Warning: Failed to load config file:".yellow());
            }
            FileConfig::default()
        }
    }
}
