//! Database repositories
//!
//! Only video records live here. Repositories are exposed behind a trait so the
//! HTTP layer can be exercised without a database.

pub mod video;

pub use video::{PgVideoRepository, VideoRepository};
