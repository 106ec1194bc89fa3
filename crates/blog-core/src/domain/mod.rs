//! Domain entities - the core business objects.

mod id;
mod post;
mod validation;

pub use id::PostId;
pub use post::{NewPost, Post, PostChanges, PostField, utc_now};
pub use validation::{MAX_CATEGORY_CHARS, MAX_TAG_CHARS, MAX_TITLE_CHARS};
