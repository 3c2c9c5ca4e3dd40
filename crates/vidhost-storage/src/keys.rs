//! Object key generation shared by all storage backends.
//!
//! Key format: `<aspect-bucket>/<hex(random 32 bytes)>.mp4`.

use crate::traits::{StorageError, StorageResult};
use rand::RngCore;
use vidhost_core::constants::{OBJECT_EXTENSION, OBJECT_ID_BYTES};
use vidhost_core::models::AspectBucket;

/// Generate an object key from the thread-local RNG.
pub fn generate_object_key(bucket: AspectBucket) -> String {
    generate_object_key_with(&mut rand::rng(), bucket)
}

/// Generate an object key from the given random source.
pub fn generate_object_key_with<R: RngCore + ?Sized>(rng: &mut R, bucket: AspectBucket) -> String {
    let mut id = [0u8; OBJECT_ID_BYTES];
    rng.fill_bytes(&mut id);
    format!("{}/{}.{}", bucket.as_str(), hex::encode(id), OBJECT_EXTENSION)
}

/// Reject keys that could escape a backend's namespace.
pub fn validate_key(storage_key: &str) -> StorageResult<()> {
    if storage_key.is_empty() {
        return Err(StorageError::InvalidKey("Storage key is empty".to_string()));
    }
    if storage_key.contains("..") || storage_key.starts_with('/') || storage_key.contains('\\') {
        return Err(StorageError::InvalidKey(
            "Storage key contains invalid characters".to_string(),
        ));
    }
    Ok(())
}
