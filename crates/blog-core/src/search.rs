//! Search query builder.
//!
//! Translates an optional search term into a [`PostFilter`]: either "match all",
//! or a logical OR of case-insensitive, unanchored substring matches over
//! title, content and category. Tags are not searched.

use crate::domain::PostField;

/// Fields a search term is matched against.
pub const SEARCH_FIELDS: [PostField; 3] =
    [PostField::Title, PostField::Content, PostField::Category];

/// Case-insensitive substring match of `needle` anywhere inside `field`.
///
/// `needle` is literal text; store adapters escape it for their own pattern syntax.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMatch {
    pub field: PostField,
    pub needle: String,
}

/// Filter expression evaluated by a [`PostRepository`](crate::ports::PostRepository).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PostFilter {
    /// Every post.
    #[default]
    MatchAll,
    /// Posts satisfying at least one of the matches.
    AnyOf(Vec<FieldMatch>),
}

impl PostFilter {
    pub fn is_match_all(&self) -> bool {
        matches!(self, PostFilter::MatchAll)
    }
}

/// Build the filter for a search term. `None` matches everything.
///
/// Callers reject an empty term before getting here.
pub fn build_search_filter(term: Option<&str>) -> PostFilter {
    match term {
        None => PostFilter::MatchAll,
        Some(term) => PostFilter::AnyOf(
            SEARCH_FIELDS
                .iter()
                .map(|&field| FieldMatch {
                    field,
                    needle: term.to_string(),
                })
                .collect(),
        ),
    }
}
