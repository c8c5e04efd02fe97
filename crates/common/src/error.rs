//! Shared error types used across bucket-view crates.

use thiserror::Error;

/// Key assembly errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    /// No filename was given for the key's final segment.
    #[error("Missing filename")]
    MissingFilename,
}
