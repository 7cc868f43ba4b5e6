//! Utility functions and helpers.
//!
//! This module contains utility functions used by both tools, such as size
//! parsing, directory measuring and size formatting.

pub mod size;

pub use size::{calculate_dir_size, format_mib, parse_size};
