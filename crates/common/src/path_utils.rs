//! Storage key assembly relative to a base directory.
//!
//! Keys are plain strings joined with [`KEY_SEPARATOR`]. Nothing here touches
//! the store; every function is pure.

use std::fmt;

use crate::constants::KEY_SEPARATOR;
use crate::error::PathError;

/// Prefix against which relative paths resolve.
///
/// Constructed with exactly one trailing separator removed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct BaseDirectory(String);

impl BaseDirectory {
    /// Create a base directory from a raw prefix.
    ///
    /// Strips a single trailing separator if present. Repeated trailing
    /// separators are not collapsed: `"a//"` becomes `"a/"`.
    ///
    /// # Arguments
    /// * `raw` - Prefix as supplied by the caller
    pub fn new(raw: impl Into<String>) -> Self {
        let mut value: String = raw.into();
        if value.ends_with(KEY_SEPARATOR) {
            value.pop();
        }
        Self(value)
    }

    /// The normalized prefix.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the base directory is the bucket root.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for BaseDirectory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for BaseDirectory {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for BaseDirectory {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for BaseDirectory {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// A key identifying one object in the store.
///
/// Only [`assemble_key`] creates these, so every key written by this
/// workspace follows the same join rules.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorageKey(String);

impl StorageKey {
    /// The key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the key, returning the owned string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for StorageKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for StorageKey {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for StorageKey {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Assemble a storage key from a base directory, relative path and filename.
///
/// Join rules:
/// - empty base, empty path: `filename`
/// - empty base: `path/filename`
/// - otherwise: `base/path/filename`, even when `path` is empty
///
/// The last rule yields `"root//file.txt"` for `("root", "", "file.txt")`.
/// Keys already in buckets were written this way, so it is kept as is.
///
/// # Arguments
/// * `base` - Base directory prefix
/// * `relative_path` - Path below the base directory, may be empty
/// * `filename` - Final key segment
///
/// # Errors
/// Returns `PathError::MissingFilename` if `filename` is empty.
pub fn assemble_key(
    base: &BaseDirectory,
    relative_path: &str,
    filename: &str,
) -> Result<StorageKey, PathError> {
    if filename.is_empty() {
        return Err(PathError::MissingFilename);
    }

    let key: String = if base.is_empty() {
        if relative_path.is_empty() {
            filename.to_string()
        } else {
            format!("{}{}{}", relative_path, KEY_SEPARATOR, filename)
        }
    } else {
        format!(
            "{}{sep}{}{sep}{}",
            base.as_str(),
            relative_path,
            filename,
            sep = KEY_SEPARATOR
        )
    };

    Ok(StorageKey(key))
}

/// Check whether a key names a directory marker rather than a file.
pub fn is_directory_marker(key: &str) -> bool {
    key.ends_with(KEY_SEPARATOR)
}

/// Split a key into its segments.
///
/// Empty segments are kept, so `"a/b/"` yields `["a", "b", ""]`.
pub fn key_segments(key: &str) -> Vec<&str> {
    key.split(KEY_SEPARATOR).collect()
}

/// Leaf name and nesting depth of a directory marker.
///
/// The leaf is the second-to-last segment and the depth is the segment count
/// minus one, so `"docs/sub/"` gives `("sub", 2)`.
///
/// # Returns
/// `None` if the key has fewer than two segments (contains no separator).
pub fn directory_leaf(key: &str) -> Option<(&str, usize)> {
    let segments: Vec<&str> = key_segments(key);
    if segments.len() < 2 {
        return None;
    }
    Some((segments[segments.len() - 2], segments.len() - 1))
}
