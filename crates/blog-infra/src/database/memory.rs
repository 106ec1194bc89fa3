//! In-memory document store - used when MongoDB is not available and in tests.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use futures::{StreamExt, stream};
use regex::{Regex, RegexBuilder};
use tokio::sync::RwLock;

use blog_core::domain::{NewPost, Post, PostChanges, PostField, PostId, utc_now};
use blog_core::error::RepoError;
use blog_core::ports::{IndexSpec, POST_INDEXES, PostRepository, PostStream, UpdateOutcome};
use blog_core::search::PostFilter;

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

/// Identifier layout: 4 bytes of big-endian Unix seconds, then an 8-byte
/// process-wide counter. Never repeats within a process, and sorts in
/// creation order. Seconds saturate at `u32::MAX` (year 2106).
fn generate_id() -> PostId {
    let secs = u32::try_from(utc_now().timestamp()).unwrap_or(u32::MAX);
    let seq = NEXT_ID.fetch_add(1, Ordering::Relaxed);

    let mut bytes = [0u8; PostId::LEN];
    bytes[..4].copy_from_slice(&secs.to_be_bytes());
    bytes[4..].copy_from_slice(&seq.to_be_bytes());
    PostId::from_bytes(bytes)
}

/// Backing store shared by every [`InMemoryPostRepository`] built on it.
///
/// Posts are kept keyed by id, which is also their natural result order.
/// Note: Data is lost on process restart.
#[derive(Default)]
pub struct InMemoryPostStore {
    posts: RwLock<BTreeMap<PostId, Post>>,
    indexes: RwLock<Vec<IndexSpec>>,
}

impl InMemoryPostStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Indexes currently defined, in creation order.
    pub async fn indexes(&self) -> Vec<IndexSpec> {
        self.indexes.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.posts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.posts.read().await.is_empty()
    }
}

/// Post repository over an [`InMemoryPostStore`].
#[derive(Clone)]
pub struct InMemoryPostRepository {
    store: Arc<InMemoryPostStore>,
}

impl InMemoryPostRepository {
    /// Create the repository and ensure the post indexes exist.
    pub async fn new(store: Arc<InMemoryPostStore>) -> Result<Self, RepoError> {
        let repo = Self { store };
        repo.ensure_indexes().await;
        Ok(repo)
    }

    pub async fn ensure_indexes(&self) {
        let mut indexes = self.store.indexes.write().await;
        for spec in POST_INDEXES {
            if !indexes.contains(&spec) {
                indexes.push(spec);
            }
        }
    }
}

/// Compiled form of a [`PostFilter`].
enum Matcher {
    All,
    AnyOf(Vec<(PostField, Regex)>),
}

impl Matcher {
    fn compile(filter: &PostFilter) -> Result<Self, RepoError> {
        match filter {
            PostFilter::MatchAll => Ok(Matcher::All),
            PostFilter::AnyOf(matches) => matches
                .iter()
                .map(|m| {
                    RegexBuilder::new(&regex::escape(&m.needle))
                        .case_insensitive(true)
                        .build()
                        .map(|re| (m.field, re))
                        .map_err(|e| RepoError::Query(e.to_string()))
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Matcher::AnyOf),
        }
    }

    fn matches(&self, post: &Post) -> bool {
        match self {
            Matcher::All => true,
            Matcher::AnyOf(clauses) => clauses.iter().any(|(field, re)| match field {
                PostField::Id => re.is_match(&post.id.to_hex()),
                PostField::Title => re.is_match(&post.title),
                PostField::Content => re.is_match(&post.content),
                PostField::Category => re.is_match(&post.category),
                PostField::Tags => post.tags.iter().any(|tag| re.is_match(tag)),
                PostField::CreatedAt | PostField::UpdatedAt => false,
            }),
        }
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn create(&self, post: NewPost) -> Result<PostId, RepoError> {
        let id = generate_id();
        let post = post.into_post(id, utc_now());

        self.store.posts.write().await.insert(id, post);
        tracing::debug!(post_id = %id, "Post created");
        Ok(id)
    }

    async fn get(&self, id: &PostId) -> Result<Option<Post>, RepoError> {
        Ok(self.store.posts.read().await.get(id).cloned())
    }

    async fn update(
        &self,
        id: &PostId,
        changes: PostChanges,
    ) -> Result<UpdateOutcome, RepoError> {
        let mut posts = self.store.posts.write().await;
        let Some(post) = posts.get_mut(id) else {
            return Ok(UpdateOutcome::default());
        };

        changes.apply_to(post, utc_now());
        Ok(UpdateOutcome {
            matched: 1,
            modified: 1,
        })
    }

    async fn delete(&self, id: &PostId) -> Result<u64, RepoError> {
        let removed = self.store.posts.write().await.remove(id);
        Ok(u64::from(removed.is_some()))
    }

    /// Matches are collected under the read lock and then streamed, so unlike
    /// the MongoDB cursor this reads the whole result set up front.
    async fn search(&self, filter: &PostFilter) -> Result<PostStream, RepoError> {
        let matcher = Matcher::compile(filter)?;
        let hits: Vec<Post> = self
            .store
            .posts
            .read()
            .await
            .values()
            .filter(|post| matcher.matches(post))
            .cloned()
            .collect();

        Ok(stream::iter(hits.into_iter().map(Ok)).boxed())
    }
}
