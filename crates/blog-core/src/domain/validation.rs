//! Input validation for post payloads.
//!
//! Runs at the boundary, before anything reaches the repository. Text fields
//! are trimmed, must not be blank, and are measured in characters.

use super::{NewPost, PostChanges};
use crate::error::DomainError;

pub const MAX_TITLE_CHARS: usize = 200;
pub const MAX_CATEGORY_CHARS: usize = 100;
pub const MAX_TAG_CHARS: usize = 50;

#[derive(Default)]
struct Violations(Vec<String>);

impl Violations {
    fn text(&mut self, field: &str, value: String, max_chars: Option<usize>) -> String {
        let value = value.trim().to_string();
        if value.is_empty() {
            self.0.push(format!("{field}: This field may not be blank."));
        } else if let Some(max) = max_chars
            && value.chars().count() > max
        {
            self.0.push(format!(
                "{field}: Ensure this field has no more than {max} characters."
            ));
        }
        value
    }

    fn tags(&mut self, tags: Vec<String>) -> Vec<String> {
        tags.into_iter()
            .enumerate()
            .map(|(i, tag)| self.text(&format!("tags[{i}]"), tag, Some(MAX_TAG_CHARS)))
            .collect()
    }

    fn finish<T>(self, value: T) -> Result<T, DomainError> {
        if self.0.is_empty() {
            Ok(value)
        } else {
            Err(DomainError::Validation(self.0))
        }
    }
}

impl NewPost {
    /// Normalize and check every field, reporting all violations at once.
    pub fn validated(self) -> Result<Self, DomainError> {
        let mut v = Violations::default();
        let post = NewPost {
            title: v.text("title", self.title, Some(MAX_TITLE_CHARS)),
            content: v.text("content", self.content, None),
            category: v.text("category", self.category, Some(MAX_CATEGORY_CHARS)),
            tags: v.tags(self.tags),
        };
        v.finish(post)
    }
}

impl PostChanges {
    /// Same rules as [`NewPost::validated`], applied to the fields present.
    /// A change set with no fields is rejected.
    pub fn validated(self) -> Result<Self, DomainError> {
        if self.is_empty() {
            return Err(DomainError::Validation(vec![
                "At least one field must be provided.".to_string(),
            ]));
        }

        let mut v = Violations::default();
        let changes = PostChanges {
            title: self
                .title
                .map(|t| v.text("title", t, Some(MAX_TITLE_CHARS))),
            content: self.content.map(|c| v.text("content", c, None)),
            category: self
                .category
                .map(|c| v.text("category", c, Some(MAX_CATEGORY_CHARS))),
            tags: self.tags.map(|t| v.tags(t)),
        };
        v.finish(changes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn messages(err: DomainError) -> Vec<String> {
        match err {
            DomainError::Validation(msgs) => msgs,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn trims_valid_input() {
        let post = NewPost::new("  Hello ", "Body", " Tech", vec![" rust ".into()])
            .validated()
            .unwrap();
        assert_eq!(post.title, "Hello");
        assert_eq!(post.category, "Tech");
        assert_eq!(post.tags, vec!["rust".to_string()]);
    }

    #[test]
    fn empty_tag_list_is_allowed() {
        assert!(NewPost::new("T", "C", "K", vec![]).validated().is_ok());
    }

    #[test]
    fn reports_every_violation() {
        let err = NewPost::new(
            "x".repeat(MAX_TITLE_CHARS + 1),
            "   ",
            "y".repeat(MAX_CATEGORY_CHARS + 1),
            vec!["ok".into(), "z".repeat(MAX_TAG_CHARS + 1), "".into()],
        )
        .validated()
        .unwrap_err();

        let msgs = messages(err);
        assert_eq!(msgs.len(), 5);
        assert!(msgs[0].starts_with("title:"));
        assert!(msgs[1].starts_with("content:"));
        assert!(msgs[2].starts_with("category:"));
        assert!(msgs[3].starts_with("tags[1]:"));
        assert!(msgs[4].starts_with("tags[2]:"));
    }

    #[test]
    fn limits_count_characters_not_bytes() {
        let title = "é".repeat(MAX_TITLE_CHARS);
        assert!(NewPost::new(title, "C", "K", vec![]).validated().is_ok());
    }

    #[test]
    fn partial_changes_check_present_fields_only() {
        let changes = PostChanges {
            category: Some(" Science ".into()),
            ..Default::default()
        }
        .validated()
        .unwrap();
        assert_eq!(changes.category.as_deref(), Some("Science"));
        assert!(changes.title.is_none());

        let err = PostChanges {
            title: Some(String::new()),
            ..Default::default()
        }
        .validated()
        .unwrap_err();
        assert_eq!(messages(err).len(), 1);
    }

    #[test]
    fn empty_change_set_is_rejected() {
        assert!(PostChanges::default().validated().is_err());
    }
}
