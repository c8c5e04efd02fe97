//! Native backends for bucket-view.
//!
//! This crate provides:
//! - `CrtObjectStore`: an `ObjectStore` implementation using the AWS SDK for Rust
//! - `ReqwestFetcher`: an `HttpFetcher` implementation using reqwest
//!
//! # Example
//!
//! ```ignore
//! use bucket_view_storage::{BucketView, StorageSettings};
//! use bucket_view_storage_crt::{CrtObjectStore, FetchSettings, ReqwestFetcher};
//!
//! let settings = StorageSettings::new("my-bucket");
//! let store = CrtObjectStore::new(&settings).await?;
//! let fetcher = ReqwestFetcher::new(FetchSettings::default())?;
//!
//! let view = BucketView::from_settings(&store, &settings, "uploads");
//! view.upload_from_url(&fetcher, "2024", "https://example.com/report").await?;
//! ```

mod client;
mod error;
mod fetcher;

pub use client::CrtObjectStore;
pub use error::CrtError;
pub use fetcher::{FetchSettings, ReqwestFetcher};
