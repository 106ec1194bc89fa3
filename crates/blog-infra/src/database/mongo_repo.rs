//! MongoDB post repository.

use std::sync::Arc;

use async_trait::async_trait;
use futures::{StreamExt, TryStreamExt};
use mongodb::Collection;

use blog_core::domain::{NewPost, Post, PostChanges, PostId, utc_now};
use blog_core::error::RepoError;
use blog_core::ports::{POST_INDEXES, POSTS_COLLECTION, PostRepository, PostStream, UpdateOutcome};
use blog_core::search::PostFilter;

use super::connections::MongoConnector;
use super::entity::post::{PostDocument, id_filter, to_post_id};
use super::filter::{filter_to_document, index_model, update_pipeline};

/// Post repository backed by the `blog_posts` collection.
///
/// Every operation asks the connector for its current handle, so a repository
/// outliving a closed connector fails with [`RepoError::NotConnected`].
pub struct MongoPostRepository {
    connector: Arc<MongoConnector>,
}

impl MongoPostRepository {
    /// Create the repository and ensure the post indexes exist.
    pub async fn new(connector: Arc<MongoConnector>) -> Result<Self, RepoError> {
        let repo = Self { connector };
        repo.ensure_indexes().await?;
        Ok(repo)
    }

    /// Idempotent: indexes that already exist with the same keys and name are left as is.
    pub async fn ensure_indexes(&self) -> Result<(), RepoError> {
        let models: Vec<_> = POST_INDEXES.iter().map(index_model).collect();
        let result = self
            .collection()
            .await?
            .create_indexes(models)
            .await
            .map_err(|e| RepoError::Index(e.to_string()))?;

        tracing::debug!(indexes = ?result.index_names, "Post indexes ensured");
        Ok(())
    }

    async fn collection(&self) -> Result<Collection<PostDocument>, RepoError> {
        Ok(self
            .connector
            .handle()
            .await?
            .collection::<PostDocument>(POSTS_COLLECTION))
    }
}

fn query_err(e: mongodb::error::Error) -> RepoError {
    RepoError::Query(e.to_string())
}

#[async_trait]
impl PostRepository for MongoPostRepository {
    async fn create(&self, post: NewPost) -> Result<PostId, RepoError> {
        let document = PostDocument::new(post, utc_now());
        let id = to_post_id(&document.id);

        self.collection()
            .await?
            .insert_one(document)
            .await
            .map_err(query_err)?;

        tracing::debug!(post_id = %id, "Post created");
        Ok(id)
    }

    async fn get(&self, id: &PostId) -> Result<Option<Post>, RepoError> {
        let found = self
            .collection()
            .await?
            .find_one(id_filter(id))
            .await
            .map_err(query_err)?;

        found.map(Post::try_from).transpose()
    }

    async fn update(
        &self,
        id: &PostId,
        changes: PostChanges,
    ) -> Result<UpdateOutcome, RepoError> {
        let result = self
            .collection()
            .await?
            .update_one(id_filter(id), update_pipeline(changes, utc_now()))
            .await
            .map_err(query_err)?;

        tracing::debug!(
            post_id = %id,
            matched = result.matched_count,
            modified = result.modified_count,
            "Post updated"
        );
        Ok(UpdateOutcome {
            matched: result.matched_count,
            modified: result.modified_count,
        })
    }

    async fn delete(&self, id: &PostId) -> Result<u64, RepoError> {
        let result = self
            .collection()
            .await?
            .delete_one(id_filter(id))
            .await
            .map_err(query_err)?;

        tracing::debug!(post_id = %id, deleted = result.deleted_count, "Post deleted");
        Ok(result.deleted_count)
    }

    async fn search(&self, filter: &PostFilter) -> Result<PostStream, RepoError> {
        let cursor = self
            .collection()
            .await?
            .find(filter_to_document(filter))
            .await
            .map_err(query_err)?;

        Ok(cursor
            .map_err(query_err)
            .and_then(|doc| async move { Post::try_from(doc) })
            .boxed())
    }
}
