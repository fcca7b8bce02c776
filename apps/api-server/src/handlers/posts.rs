//! Post handlers - `/api/Postagens`.
//!
//! Every action requires an authenticated caller.

use actix_web::{HttpResponse, http::header, web};

use blog_core::DomainError;
use blog_core::domain::PostDraft;
use blog_shared::dto::PostRequest;

use crate::middleware::auth::{Authenticated, Authorized};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/Postagens
///
/// 204 when there are no posts.
pub async fn list_posts(
    _caller: Authorized<Authenticated>,
    state: web::Data<AppState>,
) -> AppResult<HttpResponse> {
    let posts = state.posts.find_all().await.map_err(AppError::lookup)?;

    if posts.is_empty() {
        return Ok(HttpResponse::NoContent().finish());
    }
    Ok(HttpResponse::Ok().json(posts))
}

/// GET /api/Postagens/id/{id}
pub async fn get_post(
    _caller: Authorized<Authenticated>,
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let post = state
        .posts
        .find_by_id(id)
        .await
        .map_err(AppError::lookup)?
        .ok_or(DomainError::NotFound {
            entity_type: "Post",
            id,
        })?;

    Ok(HttpResponse::Ok().json(post))
}

/// POST /api/Postagens
pub async fn create_post(
    caller: Authorized<Authenticated>,
    state: web::Data<AppState>,
    body: web::Json<PostRequest>,
) -> AppResult<HttpResponse> {
    let draft = post_draft(&body)?;

    let post = state.posts.create(draft).await.map_err(AppError::write)?;
    tracing::info!(
        post_id = post.id,
        user_id = caller.identity().user_id,
        "Post created"
    );

    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("/api/Postagens/id/{}", post.id)))
        .json(post))
}

/// PUT /api/Postagens
///
/// Replaces the whole post and echoes the request body.
pub async fn update_post(
    caller: Authorized<Authenticated>,
    state: web::Data<AppState>,
    body: web::Json<PostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let id = req
        .id
        .ok_or_else(|| AppError::BadRequest("id is required".to_string()))?;
    let draft = post_draft(&req)?;

    state.posts.update(id, draft).await.map_err(AppError::write)?;
    tracing::info!(post_id = id, user_id = caller.identity().user_id, "Post updated");

    Ok(HttpResponse::Ok().json(req))
}

/// DELETE /api/Postagens/deletar/{id}
pub async fn delete_post(
    caller: Authorized<Authenticated>,
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    state.posts.delete(id).await.map_err(AppError::lookup)?;
    tracing::info!(post_id = id, user_id = caller.identity().user_id, "Post deleted");

    Ok(HttpResponse::NoContent().finish())
}

fn post_draft(req: &PostRequest) -> AppResult<PostDraft> {
    let creator = req
        .creator
        .ok_or_else(|| AppError::BadRequest("criador is required".to_string()))?;
    let theme = req
        .theme
        .ok_or_else(|| AppError::BadRequest("tema is required".to_string()))?;

    let draft = PostDraft::new(
        req.title.as_str(),
        req.description.as_str(),
        req.photo.clone(),
        creator.id,
        theme.id,
    )?;
    Ok(draft)
}
