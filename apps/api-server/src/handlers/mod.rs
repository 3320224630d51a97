//! HTTP handlers and route configuration.

mod health;
mod posts;

use actix_web::{HttpRequest, error::JsonPayloadError, web};
use inkwell_core::ports::EventLogger;

use crate::middleware::error::AppError;
use crate::state::AppState;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            // Post editor routes, all authenticated
            .service(
                web::scope("/post/editor")
                    .app_data(web::JsonConfig::default().error_handler(reject_payload))
                    .service(
                        web::resource(vec!["", "/"])
                            .route(web::get().to(posts::list_posts))
                            .route(web::post().to(posts::create_post))
                            .route(web::put().to(posts::update_post)),
                    )
                    .service(
                        web::resource("/{url}")
                            .route(web::get().to(posts::get_post))
                            .route(web::delete().to(posts::delete_post)),
                    ),
            ),
    );
}

/// Bodies that do not deserialize into a post are a bad request.
fn reject_payload(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    if let Some(state) = req.app_data::<web::Data<AppState>>() {
        state
            .logger
            .log_error(&format!("Invalid post model object sent from client: {err}"));
    }
    AppError::BadRequest("Invalid post model object".to_string()).into()
}
