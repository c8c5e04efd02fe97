//! Shared constants used across bucket-view crates.

/// Separator between key segments.
///
/// Object stores are flat; a key ending with this character is treated as a
/// directory marker rather than a file.
pub const KEY_SEPARATOR: char = '/';

/// Prefix for filenames synthesized when a download names no file.
pub const UNTITLED_PREFIX: &str = "untitled_";

/// Header emitted before a verbose file listing.
pub const ACCESSIBLE_FILES_HEADER: &str = "** Accessible Files **";

/// Header emitted before a directory rendering.
pub const ACCESSIBLE_DIRECTORIES_HEADER: &str = "** Accessible Directories **";

/// Indentation unit for listings and directory renderings.
pub const INDENT: &str = "\t";
