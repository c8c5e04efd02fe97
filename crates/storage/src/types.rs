//! Shared data structures for storage operations.

use std::collections::HashMap;

use bucket_view_common::StorageKey;
use serde::{Deserialize, Serialize};

/// Configuration settings for bucket access.
#[derive(Debug, Clone)]
pub struct StorageSettings {
    /// Bucket name.
    pub bucket: String,
    /// AWS region.
    pub region: String,
    /// AWS credentials (access key, secret key, session token).
    /// Uses the default credential chain when absent.
    pub credentials: Option<AwsCredentials>,
    /// Expected bucket owner account ID, checked by the service on every request.
    pub expected_bucket_owner: Option<String>,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            bucket: String::new(),
            region: "us-west-2".into(),
            credentials: None,
            expected_bucket_owner: None,
        }
    }
}

impl StorageSettings {
    /// Create settings for a bucket with default region and credential chain.
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            ..Default::default()
        }
    }

    /// Set the AWS region.
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    /// Use static credentials instead of the default chain.
    pub fn with_credentials(mut self, credentials: AwsCredentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set the expected bucket owner.
    pub fn with_expected_bucket_owner(mut self, owner: impl Into<String>) -> Self {
        self.expected_bucket_owner = Some(owner.into());
        self
    }
}

/// AWS credentials.
#[derive(Debug, Clone)]
pub struct AwsCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: Option<String>,
}

impl AwsCredentials {
    /// Create long-term credentials without a session token.
    pub fn new(access_key_id: impl Into<String>, secret_access_key: impl Into<String>) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            session_token: None,
        }
    }
}

/// Read permission requested by the caller for an upload.
///
/// Has no `Default`. Uploads take `Option<AccessLevel>` and reject `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessLevel {
    /// Only the bucket owner can read the object.
    Private,
    /// Anyone can read the object.
    Public,
}

impl AccessLevel {
    /// Canned ACL applied to objects uploaded with this access level.
    pub fn acl(self) -> ObjectAcl {
        match self {
            AccessLevel::Private => ObjectAcl::BucketOwnerFullControl,
            AccessLevel::Public => ObjectAcl::PublicRead,
        }
    }
}

impl From<bool> for AccessLevel {
    /// `true` means public, matching a `public` flag.
    fn from(public: bool) -> Self {
        if public {
            AccessLevel::Public
        } else {
            AccessLevel::Private
        }
    }
}

/// Canned ACL sent with a put request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ObjectAcl {
    BucketOwnerFullControl,
    PublicRead,
}

impl ObjectAcl {
    /// Wire value of the canned ACL.
    pub fn as_str(self) -> &'static str {
        match self {
            ObjectAcl::BucketOwnerFullControl => "bucket-owner-full-control",
            ObjectAcl::PublicRead => "public-read",
        }
    }
}

/// Options for file listings.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListOptions {
    /// Emit a header and every retained key to the output sink.
    pub verbose: bool,
}

impl ListOptions {
    /// Create options with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether the listing is echoed to the output sink.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

/// Result of a single upload.
#[derive(Debug, Clone)]
pub struct UploadResult {
    /// Key the object was written to.
    pub key: StorageKey,
    /// Bytes sent to the store.
    pub bytes_transferred: u64,
    /// ACL the object was written with.
    pub acl: ObjectAcl,
}

/// Response of an HTTP GET.
#[derive(Debug, Clone, Default)]
pub struct FetchedContent {
    /// Response body.
    pub body: Vec<u8>,
    /// Response headers keyed by lowercase name.
    headers: HashMap<String, String>,
}

impl FetchedContent {
    /// Create a response from a body and header pairs.
    ///
    /// Header names are lowercased; a repeated name keeps the last value.
    pub fn new<I, K, V>(body: Vec<u8>, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let headers: HashMap<String, String> = headers
            .into_iter()
            .map(|(k, v)| (k.as_ref().to_ascii_lowercase(), v.into()))
            .collect();
        Self { body, headers }
    }

    /// Look up a header, ignoring case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(|v| v.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_level_acl() {
        assert_eq!(AccessLevel::Private.acl(), ObjectAcl::BucketOwnerFullControl);
        assert_eq!(AccessLevel::Public.acl(), ObjectAcl::PublicRead);
    }

    #[test]
    fn test_access_level_from_public_flag() {
        assert_eq!(AccessLevel::from(true), AccessLevel::Public);
        assert_eq!(AccessLevel::from(false), AccessLevel::Private);
    }

    #[test]
    fn test_object_acl_wire_values() {
        assert_eq!(
            ObjectAcl::BucketOwnerFullControl.as_str(),
            "bucket-owner-full-control"
        );
        assert_eq!(ObjectAcl::PublicRead.as_str(), "public-read");
    }

    #[test]
    fn test_object_acl_serde_matches_wire_values() {
        let json: String = serde_json::to_string(&ObjectAcl::PublicRead).unwrap();
        assert_eq!(json, "\"public-read\"");
        let level: AccessLevel = serde_json::from_str("\"private\"").unwrap();
        assert_eq!(level, AccessLevel::Private);
    }

    #[test]
    fn test_storage_settings_builder() {
        let settings = StorageSettings::new("my-bucket")
            .with_region("eu-central-1")
            .with_credentials(AwsCredentials::new("AKIA", "secret"))
            .with_expected_bucket_owner("123456789012");

        assert_eq!(settings.bucket, "my-bucket");
        assert_eq!(settings.region, "eu-central-1");
        assert!(settings.credentials.is_some());
        assert_eq!(settings.expected_bucket_owner.as_deref(), Some("123456789012"));
    }

    #[test]
    fn test_list_options_default_not_verbose() {
        assert!(!ListOptions::default().verbose);
        assert!(ListOptions::new().with_verbose(true).verbose);
    }

    #[test]
    fn test_fetched_content_header_case_insensitive() {
        let content = FetchedContent::new(
            b"data".to_vec(),
            vec![("Content-Disposition", "attachment; filename=\"a.txt\"")],
        );
        assert_eq!(
            content.header("content-disposition"),
            Some("attachment; filename=\"a.txt\"")
        );
        assert_eq!(
            content.header("CONTENT-DISPOSITION"),
            Some("attachment; filename=\"a.txt\"")
        );
        assert_eq!(content.header("content-type"), None);
    }
}
