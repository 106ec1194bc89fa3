//! Document store connection management and post repositories.

mod memory;

#[cfg(feature = "mongodb")]
mod connections;
#[cfg(feature = "mongodb")]
pub mod entity;
#[cfg(feature = "mongodb")]
mod filter;
#[cfg(feature = "mongodb")]
pub mod mongo_repo;

pub use memory::{InMemoryPostRepository, InMemoryPostStore};

#[cfg(feature = "mongodb")]
pub use connections::{MongoConfig, MongoConnector};
#[cfg(feature = "mongodb")]
pub use mongo_repo::MongoPostRepository;
