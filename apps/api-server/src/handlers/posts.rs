//! Post handlers.

use actix_web::{HttpResponse, web};
use futures::TryStreamExt;

use blog_core::domain::{NewPost, Post, PostChanges};
use blog_shared::dto::{
    CreatePostRequest, CreatedResponse, MessageResponse, PostResponse, SearchQuery,
    UpdatePostRequest,
};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn to_response(post: Post) -> PostResponse {
    PostResponse {
        id: post.id.to_hex(),
        title: post.title,
        content: post.content,
        category: post.category,
        tags: post.tags,
        created_at: post.created_at,
        updated_at: post.updated_at,
    }
}

fn to_new_post(req: CreatePostRequest) -> NewPost {
    NewPost::new(req.title, req.content, req.category, req.tags)
}

/// GET /api/posts?search=<term>
pub async fn list_posts(
    state: web::Data<AppState>,
    query: web::Query<SearchQuery>,
) -> AppResult<HttpResponse> {
    let term = query.search.as_deref();

    let posts: Vec<PostResponse> = state
        .posts
        .search_posts(term)
        .await?
        .map_ok(to_response)
        .try_collect::<Vec<_>>()
        .await?;

    tracing::debug!(search = ?term, hits = posts.len(), "Posts listed");
    Ok(HttpResponse::Ok().json(posts))
}

/// POST /api/posts
pub async fn create_post(
    state: web::Data<AppState>,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let post = to_new_post(body.into_inner()).validated()?;
    let id = state.posts.create_post(post).await?;

    tracing::info!(post_id = %id, "Post created");
    Ok(HttpResponse::Created().json(CreatedResponse { id: id.to_hex() }))
}

/// GET /api/posts/{post_id}
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let post = state
        .posts
        .get_post(&path)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    Ok(HttpResponse::Ok().json(to_response(post)))
}

/// PUT /api/posts/{post_id} - every mutable field is required.
pub async fn replace_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let changes = PostChanges::from(to_new_post(body.into_inner()).validated()?);
    apply_update(&state, &path, changes).await
}

/// PATCH /api/posts/{post_id} - only the fields present are changed.
pub async fn update_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let changes = PostChanges {
        title: req.title,
        content: req.content,
        category: req.category,
        tags: req.tags,
    }
    .validated()?;
    apply_update(&state, &path, changes).await
}

async fn apply_update(
    state: &AppState,
    id: &str,
    changes: PostChanges,
) -> AppResult<HttpResponse> {
    let outcome = state.posts.update_post(id, changes).await?;
    if outcome.matched == 0 {
        return Err(AppError::NotFound("Post not found or not updated".to_string()));
    }

    tracing::info!(post_id = %id, modified = outcome.modified, "Post updated");
    Ok(HttpResponse::Ok().json(MessageResponse::new("Post updated successfully")))
}

/// DELETE /api/posts/{post_id}
pub async fn delete_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    if state.posts.delete_post(&path).await? == 0 {
        return Err(AppError::NotFound("Post not found".to_string()));
    }

    tracing::info!(post_id = %path.as_str(), "Post deleted");
    Ok(HttpResponse::NoContent().finish())
}
