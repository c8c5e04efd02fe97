//! Directory-relative access to an object storage bucket.
//!
//! This crate provides a platform-agnostic view over a flat bucket that
//! behaves like a filesystem rooted at a base directory. The bucket itself is
//! reached through the [`ObjectStore`] trait, implemented by:
//!
//! - **CRT Backend** - `bucket-view-storage-crt`, using the AWS SDK for Rust
//! - **Memory Backend** - [`MemoryObjectStore`], for tests and dry runs
//!
//! # Uploads
//!
//! Content can be uploaded from raw bytes, from base64 text (optionally a data
//! URL), or by downloading a URL through an [`HttpFetcher`]. Uploads from bytes
//! and base64 require an explicit [`AccessLevel`].

mod bucket_view;
mod error;
mod memory;
pub mod payload;
mod traits;
mod types;

pub use bucket_view::{BucketView, CONTENT_DISPOSITION};
pub use error::{BucketError, FetchError, StorageError};
pub use memory::{MemoryObjectStore, StoredObject};
pub use payload::{
    decode_base64_payload, filename_from_content_disposition, strip_data_url_prefix,
    untitled_filename,
};
pub use traits::{HttpFetcher, ObjectInfo, ObjectStore};
pub use types::{
    AccessLevel, AwsCredentials, FetchedContent, ListOptions, ObjectAcl, StorageSettings,
    UploadResult,
};
