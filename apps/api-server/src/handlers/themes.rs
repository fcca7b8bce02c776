//! Theme handlers - `/api/Temas`.
//!
//! Reading and creating themes needs an authenticated caller; changing or
//! removing one needs an administrator.

use actix_web::{HttpResponse, http::header, web};

use blog_core::DomainError;
use blog_core::domain::ThemeDraft;
use blog_shared::dto::ThemeRequest;

use crate::middleware::auth::{Administrator, Authenticated, Authorized};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/Temas
///
/// 204 when there are no themes.
pub async fn list_themes(
    _caller: Authorized<Authenticated>,
    state: web::Data<AppState>,
) -> AppResult<HttpResponse> {
    let themes = state.themes.find_all().await.map_err(AppError::lookup)?;

    if themes.is_empty() {
        return Ok(HttpResponse::NoContent().finish());
    }
    Ok(HttpResponse::Ok().json(themes))
}

/// GET /api/Temas/id/{id}
pub async fn get_theme(
    _caller: Authorized<Authenticated>,
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let theme = state
        .themes
        .find_by_id(id)
        .await
        .map_err(AppError::lookup)?
        .ok_or(DomainError::NotFound {
            entity_type: "Theme",
            id,
        })?;

    Ok(HttpResponse::Ok().json(theme))
}

/// POST /api/Temas
pub async fn create_theme(
    caller: Authorized<Authenticated>,
    state: web::Data<AppState>,
    body: web::Json<ThemeRequest>,
) -> AppResult<HttpResponse> {
    let draft = ThemeDraft::new(body.into_inner().description)?;

    let theme = state.themes.create(draft).await.map_err(AppError::write)?;
    tracing::info!(
        theme_id = theme.id,
        user_id = caller.identity().user_id,
        "Theme created"
    );

    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("/api/Temas/id/{}", theme.id)))
        .json(theme))
}

/// PUT /api/Temas
///
/// Administrators only. Echoes the request body.
pub async fn update_theme(
    caller: Authorized<Administrator>,
    state: web::Data<AppState>,
    body: web::Json<ThemeRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let id = req
        .id
        .ok_or_else(|| AppError::BadRequest("id is required".to_string()))?;
    let draft = ThemeDraft::new(req.description.as_str())?;

    state.themes.update(id, draft).await.map_err(AppError::write)?;
    tracing::info!(theme_id = id, user_id = caller.identity().user_id, "Theme updated");

    Ok(HttpResponse::Ok().json(req))
}

/// DELETE /api/Temas/deletar/{id}
///
/// Administrators only. Posts filed under the theme go with it.
pub async fn delete_theme(
    caller: Authorized<Administrator>,
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    state.themes.delete(id).await.map_err(AppError::lookup)?;
    tracing::info!(theme_id = id, user_id = caller.identity().user_id, "Theme deleted");

    Ok(HttpResponse::NoContent().finish())
}
