//! Vidhost Database Library
//!
//! Repository layer over Postgres for video records, plus embedded migrations.

pub mod db;

pub use db::{PgVideoRepository, VideoRepository};

/// Migrations embedded from `crates/vidhost-db/migrations`.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
