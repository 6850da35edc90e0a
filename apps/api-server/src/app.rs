//! Application assembly - middleware order and route mounting.

use actix_web::{
    App, Error,
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    middleware::Condition,
    web,
};
use tracing_actix_web::TracingLogger;

use crate::config::AppConfig;
use crate::handlers;
use crate::middleware::ContentTypeValidator;
use crate::middleware::error::AppError;
use crate::observability::RequestIdMiddleware;
use crate::state::AppState;

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| AppError::BadRequest(format!("Invalid JSON body: {err}")).into())
}

fn form_config() -> web::FormConfig {
    web::FormConfig::default()
        .error_handler(|err, _req| AppError::BadRequest(format!("Invalid form body: {err}")).into())
}

/// Build the application.
///
/// Requests pass, outermost first, through the request logger, the optional
/// request-id tagger and the Content-Type validator before reaching a route.
/// Anything unmatched under or outside `api_prefix` gets a 404.
pub fn build_app(
    state: AppState,
    config: AppConfig,
    request_ids: bool,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .app_data(json_config())
        .app_data(form_config())
        .configure(|cfg| handlers::configure_routes(cfg, &config.api_prefix))
        .default_service(web::to(handlers::not_found))
        .wrap(ContentTypeValidator::new(config.allowed_content_types))
        .wrap(Condition::new(request_ids, RequestIdMiddleware))
        .wrap(TracingLogger::default())
}
