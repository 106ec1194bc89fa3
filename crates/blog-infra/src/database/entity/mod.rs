//! Stored document shapes.

pub mod post;

pub use post::PostDocument;
