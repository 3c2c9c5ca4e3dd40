//! Vidhost Storage Library
//!
//! Storage abstraction for processed videos, with an S3 backend (via `aws-sdk-s3`)
//! and a local filesystem backend for development.
//!
//! # Object key format
//!
//! Every stored video lives at `<aspect-bucket>/<random-hex-id>.mp4`, where the
//! aspect bucket is one of `landscape`, `portrait` or `other`. Key generation is
//! centralized in [`keys`] so all backends agree.

pub mod factory;
pub mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
pub use keys::{generate_object_key, generate_object_key_with};
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{Storage, StorageError, StorageResult};
pub use vidhost_core::StorageBackend;
