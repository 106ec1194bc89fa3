//! Translation of domain filters and index specs into MongoDB documents.

use chrono::{DateTime, Utc};
use mongodb::IndexModel;
use mongodb::bson::{Bson, Document, doc};
use mongodb::options::IndexOptions;

use blog_core::domain::{PostChanges, PostField};
use blog_core::ports::{IndexSpec, SortDirection};
use blog_core::search::{FieldMatch, PostFilter};

use super::entity::post::to_bson_datetime;

/// Document field name for a post field.
pub(super) fn field_name(field: PostField) -> &'static str {
    match field {
        PostField::Id => "_id",
        other => other.as_str(),
    }
}

/// Aggregation-pipeline update for [`PostChanges`] stamped at `now`.
///
/// `updated_at` becomes `max(now, stored + 1ms)`. Field values are wrapped in
/// `$literal`, so text starting with `$` is stored as is.
pub(super) fn update_pipeline(changes: PostChanges, now: DateTime<Utc>) -> Vec<Document> {
    let mut set = doc! {
        "updated_at": {
            "$max": [to_bson_datetime(now), { "$add": ["$updated_at", 1] }]
        }
    };
    if let Some(title) = changes.title {
        set.insert("title", doc! { "$literal": title });
    }
    if let Some(content) = changes.content {
        set.insert("content", doc! { "$literal": content });
    }
    if let Some(category) = changes.category {
        set.insert("category", doc! { "$literal": category });
    }
    if let Some(tags) = changes.tags {
        set.insert("tags", doc! { "$literal": tags });
    }

    vec![doc! { "$set": set }]
}

/// Convert a [`PostFilter`] into a query document.
///
/// - `MatchAll` becomes the empty document.
/// - `AnyOf` becomes `$or` over `$regex` clauses with the `i` option. The needle is
///   escaped, so it matches as literal text anywhere in the field.
pub(super) fn filter_to_document(filter: &PostFilter) -> Document {
    match filter {
        PostFilter::MatchAll => Document::new(),
        // `$or` rejects an empty array
        PostFilter::AnyOf(matches) if matches.is_empty() => doc! { "$expr": false },
        PostFilter::AnyOf(matches) => {
            let clauses: Vec<Bson> = matches
                .iter()
                .map(|m| Bson::Document(field_match_clause(m)))
                .collect();
            doc! { "$or": clauses }
        }
    }
}

fn field_match_clause(m: &FieldMatch) -> Document {
    let mut clause = Document::new();
    clause.insert(
        field_name(m.field),
        doc! {
            "$regex": regex::escape(&m.needle),
            "$options": "i",
        },
    );
    clause
}

/// Convert an [`IndexSpec`] into an index model with a stable name.
pub(super) fn index_model(spec: &IndexSpec) -> IndexModel {
    let name = field_name(spec.field);
    let (direction, suffix) = match spec.direction {
        SortDirection::Ascending => (1, "1"),
        SortDirection::Descending => (-1, "-1"),
    };

    // The primary key index always exists under its built-in name
    let index_name = match spec.field {
        PostField::Id => "_id_".to_string(),
        _ => format!("{name}_{suffix}"),
    };

    let mut keys = Document::new();
    keys.insert(name, direction);

    IndexModel::builder()
        .keys(keys)
        .options(IndexOptions::builder().name(index_name).build())
        .build()
}
