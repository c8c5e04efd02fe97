//! Capability traits for the object store and HTTP retrieval.

use async_trait::async_trait;

use crate::error::{FetchError, StorageError};
use crate::types::{FetchedContent, ObjectAcl};

/// Information about an object from a list operation.
#[derive(Debug, Clone)]
pub struct ObjectInfo {
    /// Object key.
    pub key: String,
    /// Object size in bytes.
    pub size: u64,
    /// Last modified timestamp (Unix epoch seconds).
    pub last_modified: Option<i64>,
    /// ETag (usually MD5 hash for non-multipart uploads).
    pub etag: Option<String>,
}

impl ObjectInfo {
    /// Create object info carrying only a key.
    pub fn from_key(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            size: 0,
            last_modified: None,
            etag: None,
        }
    }
}

/// Low-level bucket operations - implemented by each backend.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// List every object whose key starts with `prefix`.
    ///
    /// Returns the complete listing in store order.
    async fn list_objects(
        &self,
        bucket: &str,
        prefix: &str,
    ) -> Result<Vec<ObjectInfo>, StorageError>;

    /// Upload bytes with a canned ACL.
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        data: &[u8],
        acl: ObjectAcl,
    ) -> Result<(), StorageError>;
}

/// HTTP GET capability used by URL uploads.
#[async_trait]
pub trait HttpFetcher: Send + Sync {
    /// Fetch a URL, returning its body and headers.
    ///
    /// A response with any status is returned as content; only failures to
    /// complete the exchange are errors.
    async fn fetch(&self, url: &str) -> Result<FetchedContent, FetchError>;
}
