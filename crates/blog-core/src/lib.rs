//! # Blog Core
//!
//! The domain layer of the blog post store.
//! This crate contains the post model, validation rules, the search query builder
//! and the repository port, with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod search;
pub mod service;

pub use error::{DomainError, InvalidIdError, RepoError};
pub use service::PostService;
