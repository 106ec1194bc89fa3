//! Post document as stored in MongoDB.

use mongodb::bson::oid::ObjectId;
use mongodb::bson::{self, Document, doc};
use serde::{Deserialize, Serialize};

use blog_core::domain::{NewPost, Post, PostId};
use blog_core::error::RepoError;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PostDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    pub content: String,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: bson::DateTime,
    pub updated_at: bson::DateTime,
}

impl PostDocument {
    /// Build a fresh document for `post`, stamped at `now`.
    pub fn new(post: NewPost, now: chrono::DateTime<chrono::Utc>) -> Self {
        let now = to_bson_datetime(now);
        Self {
            id: ObjectId::new(),
            title: post.title,
            content: post.content,
            category: post.category,
            tags: post.tags,
            created_at: now,
            updated_at: now,
        }
    }
}

pub fn to_object_id(id: &PostId) -> ObjectId {
    ObjectId::from_bytes(id.bytes())
}

pub fn to_post_id(oid: &ObjectId) -> PostId {
    PostId::from_bytes(oid.bytes())
}

pub fn to_bson_datetime(dt: chrono::DateTime<chrono::Utc>) -> bson::DateTime {
    bson::DateTime::from_millis(dt.timestamp_millis())
}

fn to_chrono(dt: bson::DateTime) -> Result<chrono::DateTime<chrono::Utc>, RepoError> {
    chrono::DateTime::from_timestamp_millis(dt.timestamp_millis())
        .ok_or_else(|| RepoError::Corrupt(format!("timestamp out of range: {dt}")))
}

/// Filter selecting a single post by id.
pub fn id_filter(id: &PostId) -> Document {
    doc! { "_id": to_object_id(id) }
}

/// Conversion from stored document to domain Post.
impl TryFrom<PostDocument> for Post {
    type Error = RepoError;

    fn try_from(doc: PostDocument) -> Result<Self, Self::Error> {
        Ok(Self {
            id: to_post_id(&doc.id),
            title: doc.title,
            content: doc.content,
            category: doc.category,
            tags: doc.tags,
            created_at: to_chrono(doc.created_at)?,
            updated_at: to_chrono(doc.updated_at)?,
        })
    }
}
