//! S3-compatible object storage for the VocalPress backend.
//!
//! Published artifacts (processed audio, SRT files) are uploaded here and
//! served via a CDN base URL or presigned GETs. Direct client uploads use
//! short-lived presigned PUT credentials.

pub mod client;
pub mod error;
pub mod keys;

pub use client::{ObjectStoreClient, ObjectStoreConfig};
pub use error::{StorageError, StorageResult};
pub use keys::{sanitize_filename, unique_output_key, unique_upload_key};
