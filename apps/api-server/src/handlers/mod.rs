//! HTTP handlers and route configuration.

mod health;
mod posts;
mod themes;

#[cfg(test)]
mod tests;

use actix_web::web;

use crate::middleware::error::AppError;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(path_config())
        .service(
            web::scope("/api")
                // Public routes
                .route("/health", web::get().to(health::health_check))
                .service(
                    web::scope("/Postagens")
                        .route("", web::get().to(posts::list_posts))
                        .route("", web::post().to(posts::create_post))
                        .route("", web::put().to(posts::update_post))
                        .route("/id/{id}", web::get().to(posts::get_post))
                        .route("/deletar/{id}", web::delete().to(posts::delete_post)),
                )
                .service(
                    web::scope("/Temas")
                        .route("", web::get().to(themes::list_themes))
                        .route("", web::post().to(themes::create_theme))
                        .route("", web::put().to(themes::update_theme))
                        .route("/id/{id}", web::get().to(themes::get_theme))
                        .route("/deletar/{id}", web::delete().to(themes::delete_theme)),
                ),
        );
}

/// Malformed bodies answer 400 with the usual message body.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| AppError::BadRequest(format!("Invalid request body: {err}")).into())
}

/// Ids that are not integers cannot name a resource.
fn path_config() -> web::PathConfig {
    web::PathConfig::default()
        .error_handler(|err, _req| AppError::NotFound(format!("Invalid id: {err}")).into())
}
