//! Status endpoint.

use actix_web::{HttpResponse, web};
use blog_shared::dto::StatusResponse;

use crate::state::AppState;

/// GET {api_prefix}/status
pub async fn status(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(StatusResponse {
        status: "OK".to_string(),
        environment: state.environment.clone(),
    })
}
