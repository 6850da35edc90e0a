//! Blog post handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use blog_core::domain::{NewPost, Post};
use blog_shared::dto::{CreatePostRequest, PostResponse};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn to_response(post: Post) -> PostResponse {
    PostResponse {
        id: post.id,
        title: post.title,
        author: post.author,
        contents: post.contents,
        tags: post.tags,
        created_at: post.created_at,
        updated_at: post.updated_at,
    }
}

/// Build a request from urlencoded pairs.
///
/// Repeated `tags` (or `tags[]`) keys are collected in order; for the other
/// fields the last value wins. Unknown keys are ignored.
fn form_request(pairs: Vec<(String, String)>) -> CreatePostRequest {
    let mut req = CreatePostRequest::default();
    for (key, value) in pairs {
        match key.as_str() {
            "title" => req.title = Some(value),
            "author" => req.author = Some(value),
            "contents" => req.contents = Some(value),
            "tags" | "tags[]" => req.tags.push(value),
            _ => tracing::debug!(field = %key, "Ignoring unknown form field"),
        }
    }
    req
}

/// POST {api_prefix}/blog/ with `Content-Type: application/json`
pub async fn create_post_json(
    state: web::Data<AppState>,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    create_post(&state, body.into_inner()).await
}

/// POST {api_prefix}/blog/ with `Content-Type: application/x-www-form-urlencoded`
pub async fn create_post_form(
    state: web::Data<AppState>,
    body: web::Form<Vec<(String, String)>>,
) -> AppResult<HttpResponse> {
    create_post(&state, form_request(body.into_inner())).await
}

/// Every outcome produces a response: 201 with the stored post, 400 on
/// validation failure, 500 on store failure.
async fn create_post(state: &AppState, req: CreatePostRequest) -> AppResult<HttpResponse> {
    let input = NewPost {
        title: req.title,
        author: req.author,
        contents: req.contents,
        tags: req.tags,
    };
    let fields = input.present_fields();
    let tag_count = input.tags.len();

    match state.posts.create_post(input).await {
        Ok(post) => {
            tracing::info!(post_id = %post.id, tags = post.tags.len(), "Post created");
            Ok(HttpResponse::Created().json(to_response(post)))
        }
        Err(err) => {
            tracing::error!(
                operation = "create_post",
                fields = ?fields,
                tag_count,
                kind = err.kind(),
                error = %err,
                "Failed to create post"
            );
            Err(err.into())
        }
    }
}

/// GET {api_prefix}/blog/{id}
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let raw = path.into_inner();
    let id = Uuid::parse_str(&raw)
        .map_err(|_| AppError::NotFound(format!("Post with id {} not found", raw)))?;

    let post = state.posts.find_post(id).await?;
    Ok(HttpResponse::Ok().json(to_response(post)))
}
