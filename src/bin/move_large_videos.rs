//! # move-large-videos
//!
//! Moves every first-level subdirectory of a source directory that directly
//! contains a video file larger than 1 GiB into a target directory.
//!
//! ```bash
//! move-large-videos ~/incoming /mnt/archive --dry-run
//! ```

use std::process::exit;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use dir_sweep::{FileConfig, Relocator, cli::RelocateCli, output::JsonRelocateOutput};

/// Entry point for move-large-videos.
///
/// Errors from [`inner_main`] are printed to stderr before exiting with a
/// non-zero status code.
fn main() {
    match inner_main() {
        Ok(true) => {}
        Ok(false) => exit(1),
        Err(err) => {
            eprintln!("Error: {err}");
            exit(1);
        }
    }
}

/// Parse arguments and run the relocation.
///
/// Returns `Ok(false)` when the run stopped on a relocation error, which has
/// already been reported on stdout.
///
/// # Errors
///
/// Returns errors from resolving the configured options or JSON serialization.
fn inner_main() -> Result<bool> {
    let args = RelocateCli::parse();
    args.output.init_logging();

    let json_mode = args.output.json;
    let file_config = load_config(json_mode);
    let options = args.relocate_options(&file_config)?;

    log::info!(
        "Scanning {} for videos over {} bytes{}",
        args.source_dir.display(),
        options.min_video_size,
        if options.dry_run { " (dry run)" } else { "" }
    );

    let result = Relocator::new(options)
        .with_quiet(json_mode)
        .relocate(&args.source_dir, &args.target_dir);

    if json_mode {
        let output = JsonRelocateOutput::from_result(&args.source_dir, &args.target_dir, &result);
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if let Some(error) = &result.error {
        println!("{} {error}", "Error:".red());
    } else if result.moves.is_empty() {
        println!("{}", "✨ No directories with large videos found".green());
    }

    Ok(result.is_success())
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
