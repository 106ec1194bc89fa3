use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::domain::{NewPost, Post, PostChanges, PostField, PostId};
use crate::error::RepoError;
use crate::search::PostFilter;

/// Name of the collection holding posts.
pub const POSTS_COLLECTION: &str = "blog_posts";

/// Index key direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// A single-field secondary index on the posts collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IndexSpec {
    pub field: PostField,
    pub direction: SortDirection,
}

impl IndexSpec {
    pub const fn asc(field: PostField) -> Self {
        Self {
            field,
            direction: SortDirection::Ascending,
        }
    }

    pub const fn desc(field: PostField) -> Self {
        Self {
            field,
            direction: SortDirection::Descending,
        }
    }
}

/// Indexes every post repository ensures on construction.
pub const POST_INDEXES: [IndexSpec; 5] = [
    IndexSpec::asc(PostField::Id),
    IndexSpec::asc(PostField::Title),
    IndexSpec::desc(PostField::CreatedAt),
    IndexSpec::asc(PostField::Category),
    IndexSpec::asc(PostField::Tags),
];

/// Lazy sequence of search results. Each `search` call yields a fresh stream.
pub type PostStream = BoxStream<'static, Result<Post, RepoError>>;

/// Result of an update round trip.
///
/// `matched` tells whether the post exists at all; `modified` whether the store
/// rewrote it. A matched post is always rewritten, since `updated_at` advances
/// on every update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UpdateOutcome {
    pub matched: u64,
    pub modified: u64,
}

/// Post repository over the posts collection.
///
/// Implementations own index setup and timestamp management. Inputs are
/// assumed to be validated already.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Persist a new post, stamping `created_at == updated_at`, and return its id.
    async fn create(&self, post: NewPost) -> Result<PostId, RepoError>;

    /// Fetch a post. `Ok(None)` means no post has this id.
    async fn get(&self, id: &PostId) -> Result<Option<Post>, RepoError>;

    /// Merge `changes` into the post and refresh `updated_at`.
    async fn update(&self, id: &PostId, changes: PostChanges) -> Result<UpdateOutcome, RepoError>;

    /// Hard delete. Returns the number of posts removed (0 or 1).
    async fn delete(&self, id: &PostId) -> Result<u64, RepoError>;

    /// Stream posts matching `filter`, in the store's natural order, unbounded.
    async fn search(&self, filter: &PostFilter) -> Result<PostStream, RepoError>;
}
