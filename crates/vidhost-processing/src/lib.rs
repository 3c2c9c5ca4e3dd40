//! Vidhost Processing Library
//!
//! Everything that touches the uploaded bytes before they reach storage:
//! staging the request body to disk, probing dimensions with `ffprobe`,
//! classifying the aspect ratio and remuxing to a fast-start MP4 with `ffmpeg`.
//!
//! The external tools sit behind [`MediaProber`] and [`Remuxer`] so callers can
//! substitute fakes.

pub mod aspect;
pub mod error;
pub mod probe;
pub mod remux;
pub mod staging;
mod validation;

// Re-export commonly used types
pub use aspect::{classify_dimensions, classify_ratio};
pub use error::{ProcessingError, ProcessingResult};
pub use probe::{FfprobeProber, MediaProber, StreamDimensions};
pub use remux::{FfmpegRemuxer, Remuxer};
pub use staging::{StagedFile, StagingFile};
