//! Error types for storage operations.

use bucket_view_common::PathError;
use thiserror::Error;

/// Errors returned by an `ObjectStore` backend.
#[derive(Error, Debug, Clone)]
pub enum StorageError {
    /// Object not found in the bucket.
    #[error("Object not found: s3://{bucket}/{key}")]
    NotFound { bucket: String, key: String },

    /// Access denied.
    #[error("Access denied to s3://{bucket}/{key}: {message}")]
    AccessDenied {
        bucket: String,
        key: String,
        message: String,
    },

    /// Network error.
    #[error("Network error: {message}")]
    NetworkError { message: String, retryable: bool },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Other error.
    #[error("{message}")]
    Other { message: String },
}

impl StorageError {
    /// Check if this error is retryable.
    ///
    /// Informational only; nothing in this workspace retries.
    pub fn is_retryable(&self) -> bool {
        match self {
            StorageError::NetworkError { retryable, .. } => *retryable,
            StorageError::NotFound { .. } => false,
            StorageError::AccessDenied { .. } => false,
            StorageError::InvalidConfig { .. } => false,
            StorageError::Other { .. } => false,
        }
    }
}

/// Errors returned by an `HttpFetcher` backend.
#[derive(Error, Debug, Clone)]
pub enum FetchError {
    /// The request could not be completed.
    #[error("Request to {url} failed: {message}")]
    Transport { url: String, message: String },

    /// The response body could not be read.
    #[error("Reading response body from {url} failed: {message}")]
    Body { url: String, message: String },
}

/// Errors returned by `BucketView` operations.
#[derive(Error, Debug)]
pub enum BucketError {
    /// No filename was given.
    #[error("Missing filename")]
    MissingFilename,

    /// Upload was requested without deciding whether the object is public.
    #[error("Missing access level: choose private or public")]
    MissingAccessLevel,

    /// The source URL could not be retrieved.
    #[error("Failed to retrieve {url}: {message}")]
    TransportFailure { url: String, message: String },

    /// The response carried no Content-Disposition header.
    #[error("Failed to retrieve content disposition from {url}")]
    MissingContentMetadata { url: String },

    /// The Content-Disposition header has no `filename="..."` directive.
    #[error("No filename directive in content disposition: {header}")]
    MissingFilenameDirective { header: String },

    /// A base64 payload could not be decoded.
    #[error("Invalid base64 payload: {message}")]
    InvalidPayload { message: String },

    /// The store rejected a list or put call.
    #[error(transparent)]
    Store(#[from] StorageError),
}

impl From<PathError> for BucketError {
    fn from(err: PathError) -> Self {
        match err {
            PathError::MissingFilename => BucketError::MissingFilename,
        }
    }
}

impl From<FetchError> for BucketError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::Transport { url, message } | FetchError::Body { url, message } => {
                BucketError::TransportFailure { url, message }
            }
        }
    }
}
