//! Post use cases exposed to the request-handling layer.
//!
//! Takes identifiers and search terms as text, turns them into domain values
//! once, and delegates to the repository. "Not found" and zero counts come back
//! as ordinary values, never as errors.

use std::sync::Arc;

use crate::domain::{NewPost, Post, PostChanges, PostId};
use crate::error::DomainError;
use crate::ports::{PostRepository, PostStream, UpdateOutcome};
use crate::search::build_search_filter;

/// Boundary over a [`PostRepository`].
#[derive(Clone)]
pub struct PostService {
    repo: Arc<dyn PostRepository>,
}

impl PostService {
    pub fn new(repo: Arc<dyn PostRepository>) -> Self {
        Self { repo }
    }

    /// `post` must already be validated.
    pub async fn create_post(&self, post: NewPost) -> Result<PostId, DomainError> {
        Ok(self.repo.create(post).await?)
    }

    pub async fn get_post(&self, id: &str) -> Result<Option<Post>, DomainError> {
        let id = PostId::parse(id)?;
        Ok(self.repo.get(&id).await?)
    }

    /// `changes` must already be validated.
    pub async fn update_post(
        &self,
        id: &str,
        changes: PostChanges,
    ) -> Result<UpdateOutcome, DomainError> {
        let id = PostId::parse(id)?;
        Ok(self.repo.update(&id, changes).await?)
    }

    pub async fn delete_post(&self, id: &str) -> Result<u64, DomainError> {
        let id = PostId::parse(id)?;
        Ok(self.repo.delete(&id).await?)
    }

    /// Search by term, or list everything when `term` is absent. A present but
    /// empty term is rejected without touching the store.
    pub async fn search_posts(&self, term: Option<&str>) -> Result<PostStream, DomainError> {
        if term.is_some_and(str::is_empty) {
            return Err(DomainError::EmptySearchTerm);
        }
        let filter = build_search_filter(term);
        Ok(self.repo.search(&filter).await?)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use futures::{TryStreamExt, stream};

    use super::*;
    use crate::error::RepoError;
    use crate::search::PostFilter;

    #[derive(Default)]
    struct RecordingRepo {
        calls: Mutex<Vec<String>>,
        last_filter: Mutex<Option<PostFilter>>,
    }

    impl RecordingRepo {
        fn record(&self, call: &str) {
            self.calls.lock().unwrap().push(call.to_string());
        }
    }

    #[async_trait]
    impl PostRepository for RecordingRepo {
        async fn create(&self, _post: NewPost) -> Result<PostId, RepoError> {
            self.record("create");
            Ok(PostId::from_bytes([7; PostId::LEN]))
        }

        async fn get(&self, _id: &PostId) -> Result<Option<Post>, RepoError> {
            self.record("get");
            Ok(None)
        }

        async fn update(
            &self,
            _id: &PostId,
            _changes: PostChanges,
        ) -> Result<UpdateOutcome, RepoError> {
            self.record("update");
            Ok(UpdateOutcome::default())
        }

        async fn delete(&self, _id: &PostId) -> Result<u64, RepoError> {
            self.record("delete");
            Ok(0)
        }

        async fn search(&self, filter: &PostFilter) -> Result<PostStream, RepoError> {
            self.record("search");
            *self.last_filter.lock().unwrap() = Some(filter.clone());
            Ok(Box::pin(stream::empty()))
        }
    }

    fn service() -> (Arc<RecordingRepo>, PostService) {
        let repo = Arc::new(RecordingRepo::default());
        (repo.clone(), PostService::new(repo))
    }

    #[tokio::test]
    async fn invalid_ids_never_reach_the_repository() {
        let (repo, service) = service();

        assert!(matches!(
            service.get_post("not-a-valid-id").await,
            Err(DomainError::InvalidId(_))
        ));
        assert!(matches!(
            service.delete_post("not-a-valid-id").await,
            Err(DomainError::InvalidId(_))
        ));
        assert!(matches!(
            service
                .update_post("123", PostChanges::default())
                .await,
            Err(DomainError::InvalidId(_))
        ));
        assert!(repo.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_post_is_a_value_not_an_error() {
        let (_, service) = service();
        let found = service.get_post("65a1b2c3d4e5f60718293a4b").await.unwrap();
        assert!(found.is_none());
        assert_eq!(service.delete_post("65a1b2c3d4e5f60718293a4b").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn empty_search_term_is_rejected_before_the_store() {
        let (repo, service) = service();
        assert!(matches!(
            service.search_posts(Some("")).await,
            Err(DomainError::EmptySearchTerm)
        ));
        assert!(repo.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn search_passes_built_filter() {
        let (repo, service) = service();

        let hits: Vec<Post> = service
            .search_posts(None)
            .await
            .unwrap()
            .try_collect()
            .await
            .unwrap();
        assert!(hits.is_empty());
        assert_eq!(*repo.last_filter.lock().unwrap(), Some(PostFilter::MatchAll));

        let _stream = service.search_posts(Some("rust")).await.unwrap();
        assert_eq!(
            *repo.last_filter.lock().unwrap(),
            Some(build_search_filter(Some("rust")))
        );
    }
}
