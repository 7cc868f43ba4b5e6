//! # dir-sweep
//!
//! Library behind two small filesystem maintenance tools:
//!
//! - `clean-small-dirs` measures every immediate subdirectory of a directory
//!   and deletes the ones smaller than a size threshold.
//! - `move-large-videos` moves every immediate subdirectory that directly
//!   holds a large video file into a target directory.
//!
//! Both tools run a single sequential pass and support a dry-run mode that
//! only prints what would happen.
//!
//! ## Usage
//!
//! ```bash
//! # Preview which subdirectories of ~/Downloads are below 500 MiB
//! clean-small-dirs -d ~/Downloads -s 500M --dry-run
//!
//! # Move show folders holding > 1 GiB videos to the archive disk
//! move-large-videos ~/incoming /mnt/archive
//! ```

pub mod cleaner;
pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod relocator;
pub mod scanner;
pub mod utils;
pub mod video;

pub use cleaner::{CleanResult, Cleaner};
pub use config::{CleanOptions, DeletionPolicy, FileConfig, RelocateOptions};
pub use error::RelocateError;
pub use relocator::{PlannedMove, RelocateResult, Relocator};
