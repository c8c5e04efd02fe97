//! Content acquisition helpers for uploads.
//!
//! Uploads accept raw bytes, base64 text (optionally as a data URL) or the
//! body of an HTTP response. These helpers turn the latter two into bytes and
//! a filename.

use std::sync::OnceLock;

use base64::alphabet;
use base64::engine::{GeneralPurpose, GeneralPurposeConfig};
use base64::Engine as _;
use bucket_view_common::UNTITLED_PREFIX;
use chrono::NaiveDateTime;
use regex::Regex;

use crate::error::BucketError;

/// Standard alphabet with padding, tolerating non-zero trailing bits in the
/// final symbol as browser and Python decoders do.
const BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_allow_trailing_bits(true),
);

/// Remove a data-URL scheme prefix from a base64 payload.
///
/// Everything up to and including the first `,` is dropped. A payload with
/// no comma is returned unchanged.
///
/// # Arguments
/// * `payload` - Base64 text, e.g. `data:image/png;base64,iVBORw0...`
pub fn strip_data_url_prefix(payload: &str) -> &str {
    match payload.find(',') {
        Some(idx) => &payload[idx + 1..],
        None => payload,
    }
}

/// Decode a base64 payload, accepting a data-URL prefix.
///
/// ASCII whitespace inside the payload (line wrapping) is ignored.
///
/// # Arguments
/// * `payload` - Base64 text with or without a data-URL prefix
///
/// # Errors
/// Returns `BucketError::InvalidPayload` if the text is not valid base64.
pub fn decode_base64_payload(payload: &str) -> Result<Vec<u8>, BucketError> {
    let encoded: String = strip_data_url_prefix(payload)
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();

    BASE64
        .decode(encoded.as_bytes())
        .map_err(|e| BucketError::InvalidPayload {
            message: e.to_string(),
        })
}

fn filename_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r#"filename="(.*?)""#).expect("valid regex"))
}

/// Extract the quoted filename from a Content-Disposition header value.
///
/// Only the first `filename="..."` directive is considered. The returned name
/// may be empty when the header carries `filename=""`.
///
/// # Arguments
/// * `header` - Content-Disposition header value
///
/// # Returns
/// The quoted filename, or `None` if the header has no such directive.
pub fn filename_from_content_disposition(header: &str) -> Option<&str> {
    filename_pattern()
        .captures(header)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Name for content that arrived without a usable filename.
///
/// # Arguments
/// * `now` - Local time the content was received
///
/// # Returns
/// `untitled_` followed by an ISO-8601 timestamp with microseconds,
/// e.g. `untitled_2024-05-01T12:30:45.123456`.
pub fn untitled_filename(now: NaiveDateTime) -> String {
    format!("{}{}", UNTITLED_PREFIX, now.format("%Y-%m-%dT%H:%M:%S%.6f"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_strip_data_url_prefix() {
        assert_eq!(
            strip_data_url_prefix("data:text/plain;base64,aGVsbG8="),
            "aGVsbG8="
        );
    }

    #[test]
    fn test_strip_data_url_prefix_without_comma() {
        assert_eq!(strip_data_url_prefix("aGVsbG8="), "aGVsbG8=");
    }

    #[test]
    fn test_strip_data_url_prefix_only_first_comma() {
        assert_eq!(strip_data_url_prefix("a,b,c"), "b,c");
    }

    #[test]
    fn test_decode_base64_payload_with_data_url() {
        let data: Vec<u8> = decode_base64_payload("data:text/plain;base64,aGVsbG8=").unwrap();
        assert_eq!(data, b"hello");
    }

    #[test]
    fn test_decode_base64_payload_plain() {
        let data: Vec<u8> = decode_base64_payload("d29ybGQ=").unwrap();
        assert_eq!(data, b"world");
    }

    #[test]
    fn test_decode_base64_payload_ignores_line_wrapping() {
        let data: Vec<u8> = decode_base64_payload("aGVs\r\nbG8=\n").unwrap();
        assert_eq!(data, b"hello");
    }

    #[test]
    fn test_decode_base64_payload_allows_trailing_bits() {
        // Canonical encoding of "hello" is "aGVsbG8="; the final '9' sets a
        // trailing bit the decoder discards.
        let data: Vec<u8> = decode_base64_payload("data:text/plain;base64,aGVsbG9=").unwrap();
        assert_eq!(data, b"hello");
    }

    #[test]
    fn test_decode_base64_payload_invalid() {
        let result = decode_base64_payload("data:text/plain;base64,not base64!");
        assert!(matches!(result, Err(BucketError::InvalidPayload { .. })));
    }

    #[test]
    fn test_filename_from_content_disposition() {
        assert_eq!(
            filename_from_content_disposition(r#"attachment; filename="report.pdf""#),
            Some("report.pdf")
        );
    }

    #[test]
    fn test_filename_from_content_disposition_first_match() {
        assert_eq!(
            filename_from_content_disposition(r#"inline; filename="a.txt"; filename="b.txt""#),
            Some("a.txt")
        );
    }

    #[test]
    fn test_filename_from_content_disposition_empty_name() {
        assert_eq!(
            filename_from_content_disposition(r#"attachment; filename="""#),
            Some("")
        );
    }

    #[test]
    fn test_filename_from_content_disposition_no_directive() {
        assert_eq!(filename_from_content_disposition("attachment"), None);
        assert_eq!(
            filename_from_content_disposition("attachment; filename=unquoted.txt"),
            None
        );
    }

    #[test]
    fn test_untitled_filename_format() {
        let now: NaiveDateTime = NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_micro_opt(12, 30, 45, 123_456)
            .unwrap();
        assert_eq!(untitled_filename(now), "untitled_2024-05-01T12:30:45.123456");
    }
}
