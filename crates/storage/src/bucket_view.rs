//! Directory-relative operations over a bucket.
//!
//! A [`BucketView`] pairs an injected [`ObjectStore`] with a base directory
//! and resolves every relative path against it:
//!
//! - File listings and directory renderings under the base directory
//! - Existence checks for an assembled key
//! - Uploads from raw bytes, base64 text or a URL
//!
//! # Example
//!
//! ```ignore
//! use bucket_view_common::StdoutSink;
//! use bucket_view_storage::{AccessLevel, BucketView, ListOptions};
//!
//! let view = BucketView::new(&store, "my-bucket", "users/42/");
//! let files = view.list_accessible_files(ListOptions::new().with_verbose(true), &StdoutSink).await?;
//! view.upload("avatars", "me.jpg", &bytes, Some(AccessLevel::Public)).await?;
//! ```

use bucket_view_common::{
    assemble_key, directory_leaf, is_directory_marker, BaseDirectory, OutputSink, StorageKey,
    ACCESSIBLE_DIRECTORIES_HEADER, ACCESSIBLE_FILES_HEADER, INDENT,
};

use crate::error::BucketError;
use crate::payload::{decode_base64_payload, filename_from_content_disposition, untitled_filename};
use crate::traits::{HttpFetcher, ObjectInfo, ObjectStore};
use crate::types::{
    AccessLevel, FetchedContent, ListOptions, ObjectAcl, StorageSettings, UploadResult,
};

/// Response header carrying the downloaded file's name.
pub const CONTENT_DISPOSITION: &str = "content-disposition";

/// A bucket seen from a base directory.
pub struct BucketView<'a, S: ObjectStore + ?Sized> {
    /// The store for list and put operations.
    store: &'a S,
    /// Bucket name.
    bucket: String,
    /// Prefix relative paths resolve against.
    base_directory: BaseDirectory,
}

impl<'a, S: ObjectStore + ?Sized> BucketView<'a, S> {
    /// Create a new bucket view.
    ///
    /// # Arguments
    /// * `store` - Object store for list and put operations
    /// * `bucket` - Bucket name
    /// * `base_directory` - Initial base directory; one trailing `/` is removed
    pub fn new(store: &'a S, bucket: impl Into<String>, base_directory: &str) -> Self {
        Self {
            store,
            bucket: bucket.into(),
            base_directory: BaseDirectory::new(base_directory),
        }
    }

    /// Create a bucket view for the bucket named in `settings`.
    ///
    /// # Arguments
    /// * `store` - Object store for list and put operations
    /// * `settings` - Storage settings naming the bucket
    /// * `base_directory` - Initial base directory
    pub fn from_settings(store: &'a S, settings: &StorageSettings, base_directory: &str) -> Self {
        Self::new(store, settings.bucket.clone(), base_directory)
    }

    /// Bucket name.
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Current base directory.
    pub fn base_directory(&self) -> &BaseDirectory {
        &self.base_directory
    }

    /// Change the base directory, removing one trailing `/`.
    pub fn set_base_directory(&mut self, raw: &str) {
        self.base_directory = BaseDirectory::new(raw);
    }

    /// Emit the base directory as a single line.
    pub fn print_base_directory(&self, sink: &dyn OutputSink) {
        sink.emit_line(self.base_directory.as_str());
    }

    /// List the files visible from the base directory.
    ///
    /// A key is kept if it starts with the base directory and is not a
    /// directory marker. Keys are returned in store order.
    ///
    /// # Arguments
    /// * `options` - Listing options; `verbose` echoes the result to `sink`
    /// * `sink` - Destination for the verbose listing
    ///
    /// # Errors
    /// Returns `BucketError::Store` if the listing fails.
    pub async fn list_accessible_files(
        &self,
        options: ListOptions,
        sink: &dyn OutputSink,
    ) -> Result<Vec<String>, BucketError> {
        let listing: Vec<ObjectInfo> = self.list_visible().await?;

        if options.verbose {
            sink.emit_line(ACCESSIBLE_FILES_HEADER);
        }

        let mut files: Vec<String> = Vec::new();
        for object in listing {
            if !object.key.starts_with(self.base_directory.as_str())
                || is_directory_marker(&object.key)
            {
                continue;
            }
            if options.verbose {
                sink.emit_line(&format!("{}{}", INDENT, object.key));
            }
            files.push(object.key);
        }

        Ok(files)
    }

    /// Render the directory markers visible from the base directory.
    ///
    /// Each marker produces one line: its leaf name indented by one tab per
    /// separator in the key. Lines follow store order and repeated
    /// directories are not merged.
    ///
    /// # Arguments
    /// * `sink` - Destination for the rendering
    ///
    /// # Errors
    /// Returns `BucketError::Store` if the listing fails.
    pub async fn render_accessible_directories(
        &self,
        sink: &dyn OutputSink,
    ) -> Result<(), BucketError> {
        let listing: Vec<ObjectInfo> = self.list_visible().await?;

        sink.emit_line(ACCESSIBLE_DIRECTORIES_HEADER);
        for object in &listing {
            if !object.key.starts_with(self.base_directory.as_str())
                || !is_directory_marker(&object.key)
            {
                continue;
            }
            if let Some((leaf, depth)) = directory_leaf(&object.key) {
                sink.emit_line(&format!("{}{}", INDENT.repeat(depth), leaf));
            }
        }

        Ok(())
    }

    /// Check whether a file exists at a path below the base directory.
    ///
    /// An empty filename yields `false` without contacting the store.
    ///
    /// # Arguments
    /// * `relative_path` - Path below the base directory, may be empty
    /// * `filename` - Name of the file
    ///
    /// # Errors
    /// Returns `BucketError::Store` if the listing fails.
    pub async fn exists(&self, relative_path: &str, filename: &str) -> Result<bool, BucketError> {
        if filename.is_empty() {
            log::warn!("Existence check without a filename");
            return Ok(false);
        }

        let key: StorageKey = assemble_key(&self.base_directory, relative_path, filename)?;
        let listing: Vec<ObjectInfo> = self.list_visible().await?;

        let found: bool = listing.iter().any(|object| key == object.key.as_str());
        if found {
            log::info!("Found file [{}]!", key);
        }
        Ok(found)
    }

    /// Upload raw bytes to a path below the base directory.
    ///
    /// # Arguments
    /// * `relative_path` - Path below the base directory, may be empty
    /// * `filename` - Name of the file
    /// * `content` - Object body
    /// * `access` - Read permission; `None` is rejected
    ///
    /// # Errors
    /// - `BucketError::MissingFilename` if `filename` is empty
    /// - `BucketError::MissingAccessLevel` if `access` is `None`
    /// - `BucketError::Store` if the put fails
    pub async fn upload(
        &self,
        relative_path: &str,
        filename: &str,
        content: &[u8],
        access: Option<AccessLevel>,
    ) -> Result<UploadResult, BucketError> {
        let access: AccessLevel = validate_upload(filename, access)?;
        self.put(relative_path, filename, content, access.acl()).await
    }

    /// Upload base64 text to a path below the base directory.
    ///
    /// A data-URL prefix (`data:...;base64,`) is stripped before decoding.
    ///
    /// # Arguments
    /// * `relative_path` - Path below the base directory, may be empty
    /// * `filename` - Name of the file
    /// * `payload` - Base64 text, optionally a data URL
    /// * `access` - Read permission; `None` is rejected
    ///
    /// # Errors
    /// - `BucketError::MissingFilename` if `filename` is empty
    /// - `BucketError::MissingAccessLevel` if `access` is `None`
    /// - `BucketError::InvalidPayload` if the payload is not base64
    /// - `BucketError::Store` if the put fails
    pub async fn upload_base64(
        &self,
        relative_path: &str,
        filename: &str,
        payload: &str,
        access: Option<AccessLevel>,
    ) -> Result<UploadResult, BucketError> {
        let access: AccessLevel = validate_upload(filename, access)?;
        let content: Vec<u8> = decode_base64_payload(payload)?;
        self.put(relative_path, filename, &content, access.acl()).await
    }

    /// Download a URL and upload its body below the base directory.
    ///
    /// The filename comes from the response's `Content-Disposition` header.
    /// An empty quoted name falls back to `untitled_<timestamp>`. The object
    /// is always written with `bucket-owner-full-control`.
    ///
    /// # Arguments
    /// * `fetcher` - HTTP client for the download
    /// * `relative_path` - Path below the base directory, may be empty
    /// * `source_url` - URL to download
    ///
    /// # Errors
    /// - `BucketError::TransportFailure` if the download fails
    /// - `BucketError::MissingContentMetadata` if the header is absent
    /// - `BucketError::MissingFilenameDirective` if the header names no file
    /// - `BucketError::Store` if the put fails
    pub async fn upload_from_url<F: HttpFetcher + ?Sized>(
        &self,
        fetcher: &F,
        relative_path: &str,
        source_url: &str,
    ) -> Result<UploadResult, BucketError> {
        let response: FetchedContent = fetcher.fetch(source_url).await.map_err(|e| {
            log::warn!("Failed to retrieve file: {}", e);
            BucketError::from(e)
        })?;

        let disposition: &str = match response.header(CONTENT_DISPOSITION) {
            Some(value) => value,
            None => {
                log::warn!("Failed to retrieve content disposition from {}", source_url);
                return Err(BucketError::MissingContentMetadata {
                    url: source_url.to_string(),
                });
            }
        };

        let filename: String = match filename_from_content_disposition(disposition) {
            Some("") => {
                log::warn!("Failed to retrieve file name from {}", source_url);
                untitled_filename(chrono::Local::now().naive_local())
            }
            Some(name) => name.to_string(),
            None => {
                return Err(BucketError::MissingFilenameDirective {
                    header: disposition.to_string(),
                })
            }
        };

        self.put(
            relative_path,
            &filename,
            &response.body,
            ObjectAcl::BucketOwnerFullControl,
        )
        .await
    }

    async fn put(
        &self,
        relative_path: &str,
        filename: &str,
        content: &[u8],
        acl: ObjectAcl,
    ) -> Result<UploadResult, BucketError> {
        let key: StorageKey = assemble_key(&self.base_directory, relative_path, filename)?;

        log::debug!(
            "Uploading {} bytes to s3://{}/{} ({})",
            content.len(),
            self.bucket,
            key,
            acl.as_str()
        );
        self.store
            .put_object(&self.bucket, key.as_str(), content, acl)
            .await?;

        Ok(UploadResult {
            key,
            bytes_transferred: content.len() as u64,
            acl,
        })
    }

    /// Every object whose key starts with the base directory.
    async fn list_visible(&self) -> Result<Vec<ObjectInfo>, BucketError> {
        let listing: Vec<ObjectInfo> = self
            .store
            .list_objects(&self.bucket, self.base_directory.as_str())
            .await?;
        Ok(listing)
    }
}

fn validate_upload(filename: &str, access: Option<AccessLevel>) -> Result<AccessLevel, BucketError> {
    if filename.is_empty() {
        log::warn!("Upload without a filename");
        return Err(BucketError::MissingFilename);
    }
    access.ok_or_else(|| {
        log::warn!("Upload of {} without an access level", filename);
        BucketError::MissingAccessLevel
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryObjectStore;
    use bucket_view_common::MemorySink;

    #[test]
    fn test_validate_upload_missing_filename() {
        let result = validate_upload("", Some(AccessLevel::Public));
        assert!(matches!(result, Err(BucketError::MissingFilename)));
    }

    #[test]
    fn test_validate_upload_missing_access_level() {
        let result = validate_upload("a.txt", None);
        assert!(matches!(result, Err(BucketError::MissingAccessLevel)));
    }

    #[test]
    fn test_set_base_directory_strips_trailing_separator() {
        let store = MemoryObjectStore::new();
        let mut view = BucketView::new(&store, "bucket", "");
        view.set_base_directory("a/b/");
        assert_eq!(view.base_directory(), &BaseDirectory::new("a/b"));
        view.set_base_directory("a/b");
        assert_eq!(view.base_directory().as_str(), "a/b");
    }

    #[test]
    fn test_print_base_directory() {
        let store = MemoryObjectStore::new();
        let view = BucketView::new(&store, "bucket", "docs/");
        let sink = MemorySink::new();
        view.print_base_directory(&sink);
        assert_eq!(sink.lines(), vec!["docs"]);
    }

    #[test]
    fn test_from_settings_uses_bucket() {
        let store = MemoryObjectStore::new();
        let settings = StorageSettings::new("media");
        let view = BucketView::from_settings(&store, &settings, "");
        assert_eq!(view.bucket(), "media");
        assert!(view.base_directory().is_empty());
    }

    #[tokio::test]
    async fn test_list_skips_directory_markers() {
        let store = MemoryObjectStore::with_keys("bucket", ["docs/a.txt", "docs/sub/"]);
        let view = BucketView::new(&store, "bucket", "docs");
        let sink = MemorySink::new();

        let files: Vec<String> = view
            .list_accessible_files(ListOptions::default(), &sink)
            .await
            .unwrap();

        assert_eq!(files, vec!["docs/a.txt"]);
        assert!(sink.lines().is_empty());
    }

    #[tokio::test]
    async fn test_upload_assembles_key_and_acl() {
        let store = MemoryObjectStore::new();
        let view = BucketView::new(&store, "bucket", "root");

        let result: UploadResult = view
            .upload("", "file.txt", b"hello", Some(AccessLevel::Public))
            .await
            .unwrap();

        assert_eq!(result.key, "root//file.txt");
        assert_eq!(result.bytes_transferred, 5);
        assert_eq!(result.acl, ObjectAcl::PublicRead);
        let stored = store.get("bucket", "root//file.txt").unwrap();
        assert_eq!(stored.data, b"hello");
    }
}
