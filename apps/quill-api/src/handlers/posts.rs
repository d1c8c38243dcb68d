//! Post repository handlers: listing, CRUD with author-only mutation, and
//! comments.

use std::collections::HashMap;

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use quill_core::domain::{Comment, PageRequest, Post, PostDraft, PostPatch};
use quill_shared::ApiResponse;
use quill_shared::dto::{
    AddCommentRequest, CommentView, CreatePostRequest, Deleted, PostListItem, PostListQuery,
    PostView, RefSummary, UpdatePostRequest,
};

use crate::middleware::auth::{Identity, OptionalIdentity};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Batch-resolve the author and category names referenced by `posts`.
async fn resolve_names(
    state: &AppState,
    posts: &[Post],
) -> AppResult<(HashMap<Uuid, String>, HashMap<Uuid, String>)> {
    let mut author_ids: Vec<Uuid> = posts.iter().map(|p| p.author_id).collect();
    author_ids.sort_unstable();
    author_ids.dedup();

    let mut category_ids: Vec<Uuid> = posts.iter().filter_map(|p| p.category_id).collect();
    category_ids.sort_unstable();
    category_ids.dedup();

    let authors = state
        .users
        .find_by_ids(&author_ids)
        .await?
        .into_iter()
        .map(|u| (u.id, u.name))
        .collect();
    let categories = state
        .categories
        .find_by_ids(&category_ids)
        .await?
        .into_iter()
        .map(|c| (c.id, c.name))
        .collect();

    Ok((authors, categories))
}

fn author_summary(post: &Post, authors: &HashMap<Uuid, String>) -> AppResult<RefSummary> {
    let name = authors
        .get(&post.author_id)
        .ok_or_else(|| AppError::Internal(format!("author {} missing for post {}", post.author_id, post.id)))?;
    Ok(RefSummary {
        id: post.author_id,
        name: name.clone(),
    })
}

/// Null when the post's category was deleted.
fn category_summary(post: &Post, categories: &HashMap<Uuid, String>) -> Option<RefSummary> {
    let id = post.category_id?;
    categories.get(&id).map(|name| RefSummary {
        id,
        name: name.clone(),
    })
}

fn comment_view(comment: &Comment) -> CommentView {
    CommentView {
        author_id: comment.author_id,
        content: comment.content.clone(),
        created_at: comment.created_at,
    }
}

/// Full view of one post, comments included.
async fn post_view(state: &AppState, post: &Post) -> AppResult<PostView> {
    let (authors, categories) = resolve_names(state, std::slice::from_ref(post)).await?;
    let comments = state.posts.comments_of(post.id).await?;

    Ok(PostView {
        id: post.id,
        title: post.title.clone(),
        content: post.content.clone(),
        excerpt: post.excerpt.clone(),
        author: author_summary(post, &authors)?,
        category: category_summary(post, &categories),
        featured_image: post.featured_image.clone(),
        published: post.published,
        comments: comments.iter().map(comment_view).collect(),
        created_at: post.created_at,
        updated_at: post.updated_at,
    })
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Post {id} not found"))
}

/// GET /api/posts?page&pageSize&category
pub async fn list(
    state: web::Data<AppState>,
    query: web::Query<PostListQuery>,
) -> AppResult<HttpResponse> {
    let page = PageRequest::from_params(query.page, query.page_size)?;
    let posts = state.posts.find_page(page, query.category).await?;

    let (authors, categories) = resolve_names(&state, &posts).await?;
    let items = posts
        .iter()
        .map(|post| {
            Ok(PostListItem {
                id: post.id,
                title: post.title.clone(),
                excerpt: post.excerpt.clone(),
                author: author_summary(post, &authors)?,
                category: category_summary(post, &categories),
                featured_image: post.featured_image.clone(),
                created_at: post.created_at,
            })
        })
        .collect::<AppResult<Vec<_>>>()?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(items)))
}

/// GET /api/posts/{id}
pub async fn get(state: web::Data<AppState>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let post = state.posts.find_by_id(id).await?.ok_or_else(|| not_found(id))?;

    let view = post_view(&state, &post).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(view)))
}

/// POST /api/posts
///
/// The author is the authenticated caller; both author and category must
/// resolve before the insert happens.
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let draft = PostDraft::new(
        &req.title,
        &req.content,
        req.excerpt.as_deref(),
        req.featured_image,
        req.published,
    )?;

    if state.categories.find_by_id(req.category_id).await?.is_none() {
        return Err(AppError::NotFound("Category not found".to_string()));
    }
    if state.users.find_by_id(identity.user_id).await?.is_none() {
        return Err(AppError::NotFound("Author not found".to_string()));
    }

    let post = Post::new(draft, identity.user_id, req.category_id);
    let saved = state.posts.insert(post).await?;

    let view = post_view(&state, &saved).await?;
    Ok(HttpResponse::Created().json(ApiResponse::ok(view)))
}

/// PUT /api/posts/{id} - author only.
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let req = body.into_inner();

    let mut post = state.posts.find_by_id(id).await?.ok_or_else(|| not_found(id))?;
    if post.author_id != identity.user_id {
        return Err(AppError::Forbidden);
    }

    let patch = PostPatch::new(
        req.title.as_deref(),
        req.content.as_deref(),
        req.excerpt.as_deref(),
        req.featured_image,
        req.published,
    )?;
    post.apply(patch);

    let saved = state.posts.update(post).await?;
    let view = post_view(&state, &saved).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(view)))
}

/// DELETE /api/posts/{id} - author only; comments go with the post.
pub async fn remove(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let post = state.posts.find_by_id(id).await?.ok_or_else(|| not_found(id))?;
    if post.author_id != identity.user_id {
        return Err(AppError::Forbidden);
    }

    state.posts.delete(id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(Deleted { id })))
}

/// POST /api/posts/{id}/comments - anonymous callers welcome.
pub async fn add_comment(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    path: web::Path<Uuid>,
    body: web::Json<AddCommentRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let post = state.posts.find_by_id(id).await?.ok_or_else(|| not_found(id))?;

    let author_id = identity.0.map(|i| i.user_id);
    let comment = Comment::new(post.id, author_id, &body.content)?;
    state.posts.append_comment(comment).await?;

    let view = post_view(&state, &post).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(view)))
}
