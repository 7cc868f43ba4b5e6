//! Configuration for both tools.
//!
//! - [`file`] - the optional TOML config file and its layering helpers
//! - [`clean`] - options for the size-threshold cleaner
//! - [`relocate`] - options and defaults for the large-video relocator

pub mod clean;
pub mod file;
pub mod relocate;

pub use clean::{CleanOptions, DeletionPolicy};
pub use file::FileConfig;
pub use relocate::{DEFAULT_MIN_VIDEO_SIZE, DEFAULT_VIDEO_EXTENSIONS, RelocateOptions};
