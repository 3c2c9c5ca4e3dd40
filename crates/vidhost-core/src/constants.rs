//! Constants shared across crates.

/// The only content type accepted for video uploads.
pub const VIDEO_CONTENT_TYPE: &str = "video/mp4";

/// Multipart field carrying the video bytes.
pub const VIDEO_FORM_FIELD: &str = "video";

/// Default request body cap for uploads (1 GiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 1 << 30;

/// Number of random bytes behind each object key (hex-encoded to 64 chars).
pub const OBJECT_ID_BYTES: usize = 32;

/// File extension of every stored object.
pub const OBJECT_EXTENSION: &str = "mp4";

/// Default issuer expected in access tokens.
pub const DEFAULT_JWT_ISSUER: &str = "vidhost-access";
