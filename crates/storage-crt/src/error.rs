//! Error types for CRT backend operations.

use std::error::Error as StdError;
use std::fmt::Debug;

use aws_sdk_s3::error::{DisplayErrorContext, SdkError};
use bucket_view_storage::StorageError;
use thiserror::Error;

/// Errors specific to the CRT backends.
#[derive(Error, Debug)]
pub enum CrtError {
    /// AWS SDK error.
    #[error("AWS SDK error: {message}")]
    SdkError { message: String, retryable: bool },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl CrtError {
    /// Classify an SDK failure.
    ///
    /// Dispatch failures, timeouts and unreadable responses are retryable.
    /// Service errors (the request reached S3 and was rejected) and request
    /// construction failures are not.
    pub(crate) fn from_sdk<E, R>(err: SdkError<E, R>) -> Self
    where
        E: StdError + 'static,
        R: Debug,
    {
        let retryable: bool = matches!(
            err,
            SdkError::DispatchFailure(_) | SdkError::TimeoutError(_) | SdkError::ResponseError(_)
        );
        CrtError::SdkError {
            message: DisplayErrorContext(&err).to_string(),
            retryable,
        }
    }
}

impl From<CrtError> for StorageError {
    fn from(err: CrtError) -> Self {
        match err {
            CrtError::SdkError { message, retryable } => {
                StorageError::NetworkError { message, retryable }
            }
            CrtError::ConfigError(message) => StorageError::InvalidConfig { message },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_s3::config::http::HttpResponse;
    use aws_sdk_s3::operation::list_objects_v2::ListObjectsV2Error;

    type ListError = SdkError<ListObjectsV2Error, HttpResponse>;

    #[test]
    fn test_timeout_is_retryable() {
        let err: ListError = SdkError::timeout_error("operation timed out");
        let storage: StorageError = CrtError::from_sdk(err).into();
        assert!(storage.is_retryable());
    }

    #[test]
    fn test_construction_failure_is_not_retryable() {
        let err: ListError = SdkError::construction_failure("bucket is required");
        match CrtError::from_sdk(err) {
            CrtError::SdkError { message, retryable } => {
                assert!(!retryable);
                assert!(message.contains("bucket is required"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_sdk_error_keeps_retryable_flag() {
        let err: StorageError = CrtError::SdkError {
            message: "slow down".into(),
            retryable: true,
        }
        .into();
        assert!(err.is_retryable());
    }

    #[test]
    fn test_config_error_maps_to_invalid_config() {
        let err: StorageError = CrtError::ConfigError("region".into()).into();
        assert!(matches!(err, StorageError::InvalidConfig { .. }));
    }
}
