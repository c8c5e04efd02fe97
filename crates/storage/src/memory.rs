//! In-memory object store.
//!
//! Keeps objects in insertion order and counts calls, which makes it a
//! convenient backend for tests and dry runs.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::error::StorageError;
use crate::traits::{ObjectInfo, ObjectStore};
use crate::types::ObjectAcl;

/// An object held by [`MemoryObjectStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub bucket: String,
    pub key: String,
    pub data: Vec<u8>,
    pub acl: ObjectAcl,
}

/// Object store backed by a vector.
#[derive(Debug, Default)]
pub struct MemoryObjectStore {
    objects: Mutex<Vec<StoredObject>>,
    /// Error returned by every call while set.
    failure: Mutex<Option<StorageError>>,
    list_calls: AtomicU64,
    put_calls: AtomicU64,
}

impl MemoryObjectStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding empty objects under the given keys.
    ///
    /// # Arguments
    /// * `bucket` - Bucket the keys belong to
    /// * `keys` - Keys in listing order
    pub fn with_keys<I, K>(bucket: &str, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        let store = Self::new();
        {
            let mut objects = store.lock_objects();
            for key in keys {
                objects.push(StoredObject {
                    bucket: bucket.to_string(),
                    key: key.into(),
                    data: Vec::new(),
                    acl: ObjectAcl::BucketOwnerFullControl,
                });
            }
        }
        store
    }

    /// Make every subsequent call fail with `error`, or succeed again with `None`.
    pub fn set_failure(&self, error: Option<StorageError>) {
        *lock(&self.failure) = error;
    }

    /// Snapshot of all stored objects in insertion order.
    pub fn objects(&self) -> Vec<StoredObject> {
        self.lock_objects().clone()
    }

    /// Look up an object by bucket and key.
    pub fn get(&self, bucket: &str, key: &str) -> Option<StoredObject> {
        self.lock_objects()
            .iter()
            .find(|o| o.bucket == bucket && o.key == key)
            .cloned()
    }

    /// Number of `list_objects` calls received.
    pub fn list_calls(&self) -> u64 {
        self.list_calls.load(Ordering::SeqCst)
    }

    /// Number of `put_object` calls received.
    pub fn put_calls(&self) -> u64 {
        self.put_calls.load(Ordering::SeqCst)
    }

    fn lock_objects(&self) -> MutexGuard<'_, Vec<StoredObject>> {
        lock(&self.objects)
    }

    fn check_failure(&self) -> Result<(), StorageError> {
        match lock(&self.failure).as_ref() {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn list_objects(
        &self,
        bucket: &str,
        prefix: &str,
    ) -> Result<Vec<ObjectInfo>, StorageError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;

        Ok(self
            .lock_objects()
            .iter()
            .filter(|o| o.bucket == bucket && o.key.starts_with(prefix))
            .map(|o| ObjectInfo {
                key: o.key.clone(),
                size: o.data.len() as u64,
                last_modified: None,
                etag: None,
            })
            .collect())
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        data: &[u8],
        acl: ObjectAcl,
    ) -> Result<(), StorageError> {
        self.put_calls.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;

        let object = StoredObject {
            bucket: bucket.to_string(),
            key: key.to_string(),
            data: data.to_vec(),
            acl,
        };

        let mut objects = self.lock_objects();
        match objects
            .iter_mut()
            .find(|o| o.bucket == bucket && o.key == key)
        {
            Some(existing) => *existing = object,
            None => objects.push(object),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store_lists_in_insertion_order() {
        let store = MemoryObjectStore::with_keys("bucket", ["b.txt", "a.txt", "c/"]);
        let keys: Vec<String> = store
            .list_objects("bucket", "")
            .await
            .unwrap()
            .into_iter()
            .map(|o| o.key)
            .collect();
        assert_eq!(keys, vec!["b.txt", "a.txt", "c/"]);
        assert_eq!(store.list_calls(), 1);
    }

    #[tokio::test]
    async fn test_memory_store_list_filters_bucket_and_prefix() {
        let store = MemoryObjectStore::with_keys("bucket", ["docs/a.txt", "img/b.png"]);
        let listing: Vec<ObjectInfo> = store.list_objects("bucket", "docs").await.unwrap();
        assert_eq!(listing.len(), 1);
        assert_eq!(listing[0].key, "docs/a.txt");

        let other: Vec<ObjectInfo> = store.list_objects("other", "").await.unwrap();
        assert!(other.is_empty());
    }

    #[tokio::test]
    async fn test_memory_store_put_overwrites() {
        let store = MemoryObjectStore::new();
        store
            .put_object("bucket", "k", b"one", ObjectAcl::PublicRead)
            .await
            .unwrap();
        store
            .put_object("bucket", "k", b"two", ObjectAcl::BucketOwnerFullControl)
            .await
            .unwrap();

        let objects: Vec<StoredObject> = store.objects();
        assert_eq!(objects.len(), 1);
        assert_eq!(objects[0].data, b"two");
        assert_eq!(objects[0].acl, ObjectAcl::BucketOwnerFullControl);
        assert_eq!(store.put_calls(), 2);
    }

    #[tokio::test]
    async fn test_memory_store_failure_injection() {
        let store = MemoryObjectStore::new();
        store.set_failure(Some(StorageError::AccessDenied {
            bucket: "bucket".into(),
            key: "k".into(),
            message: "denied".into(),
        }));

        let result = store
            .put_object("bucket", "k", b"data", ObjectAcl::PublicRead)
            .await;
        assert!(matches!(result, Err(StorageError::AccessDenied { .. })));
        assert!(store.get("bucket", "k").is_none());

        store.set_failure(None);
        assert!(store.list_objects("bucket", "").await.is_ok());
    }
}
