//! # Blog Infrastructure
//!
//! Concrete implementations of the ports defined in `blog-core`.
//! This crate contains the document store connector and post repositories.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory only
//! - `mongodb` - MongoDB document store support

pub mod database;

// Re-exports - In-Memory
pub use database::{InMemoryPostRepository, InMemoryPostStore};

// Re-exports - MongoDB
#[cfg(feature = "mongodb")]
pub use database::{MongoConfig, MongoConnector, MongoPostRepository};
