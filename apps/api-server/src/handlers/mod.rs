//! HTTP handlers and route configuration.

mod blog;
mod status;

use actix_web::{HttpRequest, HttpResponse, guard, web};

use crate::middleware::error::{AppError, AppResult};

const JSON: &str = "application/json";
const FORM: &str = "application/x-www-form-urlencoded";

/// Configure all application routes under `api_prefix`.
///
/// Post creation is routed on the exact `Content-Type`, so each body format
/// is decoded, and its errors reported, by its own extractor.
pub fn configure_routes(cfg: &mut web::ServiceConfig, api_prefix: &str) {
    let mut posts = web::scope("/blog");
    for path in ["", "/"] {
        posts = posts
            .route(
                path,
                web::post()
                    .guard(guard::Header("content-type", JSON))
                    .to(blog::create_post_json),
            )
            .route(
                path,
                web::post()
                    .guard(guard::Header("content-type", FORM))
                    .to(blog::create_post_form),
            );
    }

    cfg.service(
        web::scope(api_prefix)
            .route("/status", web::get().to(status::status))
            .service(posts.route("/{id}", web::get().to(blog::get_post))),
    );
}

/// Fallback for unmatched routes.
pub async fn not_found(req: HttpRequest) -> AppResult<HttpResponse> {
    tracing::debug!(method = %req.method(), path = %req.path(), "No route matched");
    Err(AppError::NotFound(format!(
        "Route {} {} not found",
        req.method(),
        req.path()
    )))
}
