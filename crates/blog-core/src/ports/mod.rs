//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod repository;

pub use repository::{
    IndexSpec, POST_INDEXES, POSTS_COLLECTION, PostRepository, PostStream, SortDirection,
    UpdateOutcome,
};
