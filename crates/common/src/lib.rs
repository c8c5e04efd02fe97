//! Shared types and utilities for bucket-view.
//!
//! This crate provides common functionality used across all bucket-view crates:
//! - Storage key assembly against a base directory
//! - Output sinks for listings and directory renderings
//! - Shared constants and error types

pub mod constants;
pub mod error;
pub mod output;
pub mod path_utils;

// Re-export commonly used items at crate root
pub use constants::*;
pub use error::PathError;
pub use output::{sink_fn, FnSink, MemorySink, NoOpSink, OutputSink, StdoutSink};
pub use path_utils::{
    assemble_key, directory_leaf, is_directory_marker, key_segments, BaseDirectory, StorageKey,
};
