//! HTTP handlers and route configuration.

mod health;
mod posts;

use actix_web::web;

use crate::middleware::error::AppError;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    // Malformed bodies and query strings render as problem details too
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            // Post routes
            .service(
                web::scope("/posts")
                    .route("", web::get().to(posts::list_posts))
                    .route("", web::post().to(posts::create_post))
                    .route("/{post_id}", web::get().to(posts::get_post))
                    .route("/{post_id}", web::put().to(posts::replace_post))
                    .route("/{post_id}", web::patch().to(posts::update_post))
                    .route("/{post_id}", web::delete().to(posts::delete_post)),
            ),
    );
}
