#![allow(dead_code)]

//! Behavioral suite every `PostRepository` implementation must pass.

use chrono::Utc;
use futures::TryStreamExt;

use blog_core::domain::{NewPost, Post, PostChanges, PostId};
use blog_core::ports::PostRepository;
use blog_core::search::{PostFilter, build_search_filter};
use blog_core::{DomainError, PostService};

pub fn sample(title: &str, category: &str) -> NewPost {
    NewPost::new(
        title,
        format!("Body of {title}"),
        category,
        vec!["one".to_string(), "two".to_string()],
    )
}

pub async fn collect(repo: &dyn PostRepository, filter: &PostFilter) -> Vec<Post> {
    repo.search(filter).await.unwrap().try_collect().await.unwrap()
}

pub async fn titles(repo: &dyn PostRepository, term: Option<&str>) -> Vec<String> {
    let mut titles: Vec<_> = collect(repo, &build_search_filter(term))
        .await
        .into_iter()
        .map(|p| p.title)
        .collect();
    titles.sort();
    titles
}

pub async fn create_then_get_round_trips(repo: &dyn PostRepository) {
    let before = Utc::now() - chrono::Duration::seconds(1);
    let input = NewPost::new("Hello", "World", "Greetings", vec!["a".into(), "a".into()]);

    let id = repo.create(input.clone()).await.unwrap();
    let post = repo.get(&id).await.unwrap().expect("created post is readable");

    assert_eq!(post.id, id);
    assert_eq!(post.title, input.title);
    assert_eq!(post.content, input.content);
    assert_eq!(post.category, input.category);
    assert_eq!(post.tags, input.tags);
    assert_eq!(post.created_at, post.updated_at);
    assert!(post.created_at >= before);
    assert!(post.created_at <= Utc::now() + chrono::Duration::seconds(1));
}

pub async fn empty_tags_round_trip(repo: &dyn PostRepository) {
    let id = repo
        .create(NewPost::new("No tags", "c", "k", vec![]))
        .await
        .unwrap();
    assert!(repo.get(&id).await.unwrap().unwrap().tags.is_empty());
}

pub async fn update_merges_and_preserves_identity(repo: &dyn PostRepository) {
    let id = repo.create(sample("Original", "Tech")).await.unwrap();
    let before = repo.get(&id).await.unwrap().unwrap();

    let outcome = repo
        .update(
            &id,
            PostChanges {
                title: Some("Renamed".into()),
                tags: Some(vec![]),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(outcome.matched, 1);
    assert_eq!(outcome.modified, 1);

    let after = repo.get(&id).await.unwrap().unwrap();
    assert_eq!(after.id, before.id);
    assert_eq!(after.title, "Renamed");
    assert!(after.tags.is_empty());
    assert_eq!(after.content, before.content);
    assert_eq!(after.category, before.category);
    assert_eq!(after.created_at, before.created_at);
    assert!(after.updated_at > before.updated_at);
}

/// Back-to-back writes, usually within the same millisecond.
pub async fn updated_at_strictly_increases(repo: &dyn PostRepository) {
    for i in 0..50 {
        let id = repo.create(sample(&format!("Rapid {i}"), "Tech")).await.unwrap();
        let mut previous = repo.get(&id).await.unwrap().unwrap().updated_at;

        for _ in 0..3 {
            let outcome = repo
                .update(
                    &id,
                    PostChanges {
                        content: Some("Same content every time".into()),
                        ..Default::default()
                    },
                )
                .await
                .unwrap();
            assert_eq!(outcome.matched, 1);
            assert_eq!(outcome.modified, 1);

            let post = repo.get(&id).await.unwrap().unwrap();
            assert!(
                post.updated_at > previous,
                "updated_at went from {previous} to {}",
                post.updated_at
            );
            assert!(post.updated_at > post.created_at);
            previous = post.updated_at;
        }
    }
}

pub async fn update_of_missing_post_matches_nothing(repo: &dyn PostRepository) {
    let missing = PostId::parse("000000000000000000000000").unwrap();
    let outcome = repo
        .update(
            &missing,
            PostChanges {
                content: Some("x".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(outcome.matched, 0);
    assert_eq!(outcome.modified, 0);
    assert!(repo.get(&missing).await.unwrap().is_none());
}

pub async fn delete_is_terminal(repo: &dyn PostRepository) {
    let id = repo.create(sample("Doomed", "Tech")).await.unwrap();

    assert_eq!(repo.delete(&id).await.unwrap(), 1);
    assert!(repo.get(&id).await.unwrap().is_none());
    assert_eq!(repo.delete(&id).await.unwrap(), 0);

    let replacement = repo.create(sample("Doomed", "Tech")).await.unwrap();
    assert_ne!(replacement, id);
}

pub async fn invalid_ids_are_rejected(service: &PostService) {
    assert!(matches!(
        service.get_post("not-a-valid-id").await,
        Err(DomainError::InvalidId(_))
    ));
    assert!(matches!(
        service.delete_post("not-a-valid-id").await,
        Err(DomainError::InvalidId(_))
    ));
}

/// Expects an otherwise empty collection.
pub async fn search_is_case_insensitive_substring_or(
    repo: &dyn PostRepository,
    service: &PostService,
) {
    repo.create(NewPost::new("Python Programming", "Learn it", "Code", vec![]))
        .await
        .unwrap();
    repo.create(NewPost::new("Django Development", "Web apps", "Code", vec![]))
        .await
        .unwrap();
    repo.create(NewPost::new(
        "MongoDB Basics",
        "Documents",
        "Database",
        vec!["python".into()],
    ))
    .await
    .unwrap();

    assert_eq!(titles(repo, Some("python")).await, vec!["Python Programming"]);
    assert_eq!(titles(repo, Some("DATA")).await, vec!["MongoDB Basics"]);
    assert_eq!(titles(repo, Some("elop")).await, vec!["Django Development"]);
    assert!(titles(repo, Some("nonexistentterm")).await.is_empty());
    assert_eq!(
        titles(repo, None).await,
        vec!["Django Development", "MongoDB Basics", "Python Programming"]
    );

    assert!(matches!(
        service.search_posts(Some("")).await,
        Err(DomainError::EmptySearchTerm)
    ));
}

pub async fn search_streams_are_restartable(repo: &dyn PostRepository) {
    repo.create(sample("Streamed", "Tech")).await.unwrap();
    let filter = build_search_filter(Some("streamed"));

    let first = collect(repo, &filter).await;
    let second = collect(repo, &filter).await;
    assert_eq!(first.len(), 1);
    assert_eq!(first, second);
}
