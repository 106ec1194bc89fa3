use chrono::{DateTime, Duration, Utc};

use super::PostId;

/// Post entity - a persisted blog post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub content: String,
    pub category: String,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields of a post about to be created. Identifier and timestamps are assigned
/// by the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub category: String,
    pub tags: Vec<String>,
}

impl NewPost {
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        category: impl Into<String>,
        tags: Vec<String>,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            category: category.into(),
            tags,
        }
    }

    /// Materialize the stored post for `id`, stamped at `now`.
    pub fn into_post(self, id: PostId, now: DateTime<Utc>) -> Post {
        Post {
            id,
            title: self.title,
            content: self.content,
            category: self.category,
            tags: self.tags,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial set of mutable fields for an update. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostChanges {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl PostChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.content.is_none()
            && self.category.is_none()
            && self.tags.is_none()
    }

    /// Merge into `post`. `id` and `created_at` are never touched.
    ///
    /// `updated_at` becomes `now`, or one millisecond past its previous value
    /// when `now` does not exceed it, so every update strictly advances it.
    pub fn apply_to(self, post: &mut Post, now: DateTime<Utc>) {
        if let Some(title) = self.title {
            post.title = title;
        }
        if let Some(content) = self.content {
            post.content = content;
        }
        if let Some(category) = self.category {
            post.category = category;
        }
        if let Some(tags) = self.tags {
            post.tags = tags;
        }
        post.updated_at = now.max(post.updated_at + Duration::milliseconds(1));
    }
}

impl From<NewPost> for PostChanges {
    fn from(post: NewPost) -> Self {
        Self {
            title: Some(post.title),
            content: Some(post.content),
            category: Some(post.category),
            tags: Some(post.tags),
        }
    }
}

/// Stored fields of a post, by their document field name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PostField {
    Id,
    Title,
    Content,
    Category,
    Tags,
    CreatedAt,
    UpdatedAt,
}

impl PostField {
    pub const fn as_str(&self) -> &'static str {
        match self {
            PostField::Id => "id",
            PostField::Title => "title",
            PostField::Content => "content",
            PostField::Category => "category",
            PostField::Tags => "tags",
            PostField::CreatedAt => "created_at",
            PostField::UpdatedAt => "updated_at",
        }
    }
}

/// Current UTC time truncated to milliseconds, the precision the store keeps.
pub fn utc_now() -> DateTime<Utc> {
    let now = Utc::now();
    DateTime::from_timestamp_millis(now.timestamp_millis()).unwrap_or(now)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Post {
        NewPost::new("Title", "Body", "Tech", vec!["rust".into()])
            .into_post(PostId::from_bytes([1; PostId::LEN]), utc_now())
    }

    #[test]
    fn new_post_gets_equal_timestamps() {
        let post = sample();
        assert_eq!(post.created_at, post.updated_at);
        assert_eq!(post.created_at.timestamp_subsec_nanos() % 1_000_000, 0);
    }

    #[test]
    fn apply_merges_only_present_fields() {
        let mut post = sample();
        let created_at = post.created_at;
        let later = created_at + Duration::seconds(1);

        let changes = PostChanges {
            content: Some("New body".into()),
            ..Default::default()
        };
        changes.apply_to(&mut post, later);

        assert_eq!(post.title, "Title");
        assert_eq!(post.content, "New body");
        assert_eq!(post.tags, vec!["rust".to_string()]);
        assert_eq!(post.created_at, created_at);
        assert_eq!(post.updated_at, later);
    }

    #[test]
    fn apply_at_the_same_instant_still_advances_updated_at() {
        let mut post = sample();
        let created_at = post.created_at;

        for step in 1..=3 {
            let changes = PostChanges {
                title: Some("Title".into()),
                ..Default::default()
            };
            changes.apply_to(&mut post, created_at);
            assert_eq!(post.updated_at, created_at + Duration::milliseconds(step));
        }
        assert_eq!(post.title, "Title");
        assert_eq!(post.created_at, created_at);
    }

    #[test]
    fn apply_never_moves_updated_at_backwards() {
        let mut post = sample();
        let earlier = post.updated_at - Duration::seconds(5);

        PostChanges::default().apply_to(&mut post, earlier);
        assert!(post.updated_at > post.created_at);
    }
}
