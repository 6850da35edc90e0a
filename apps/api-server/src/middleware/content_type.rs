//! Content-Type validation middleware.
//!
//! Mutating requests (`POST`, `PUT`, `PATCH`) must declare a `Content-Type`
//! that exactly equals one of the allowed values. Parameters are not
//! stripped, so `application/json; charset=utf-8` is rejected when only
//! `application/json` is allowed.

use actix_web::{
    Error, ResponseError,
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    http::{Method, header::CONTENT_TYPE},
};
use std::future::{Future, Ready, ready};
use std::pin::Pin;
use std::rc::Rc;

use super::error::AppError;

/// Content-Type validation middleware factory.
pub struct ContentTypeValidator {
    allowed: Rc<Vec<String>>,
}

impl ContentTypeValidator {
    pub fn new(allowed: Vec<String>) -> Self {
        Self {
            allowed: Rc::new(allowed),
        }
    }
}

fn is_mutating(method: &Method) -> bool {
    *method == Method::POST || *method == Method::PUT || *method == Method::PATCH
}

fn is_allowed(allowed: &[String], content_type: &str) -> bool {
    allowed.iter().any(|t| t == content_type)
}

impl<S, B> Transform<S, ServiceRequest> for ContentTypeValidator
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = ContentTypeValidatorService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ContentTypeValidatorService {
            service,
            allowed: self.allowed.clone(),
        }))
    }
}

pub struct ContentTypeValidatorService<S> {
    service: S,
    allowed: Rc<Vec<String>>,
}

impl<S, B> Service<ServiceRequest> for ContentTypeValidatorService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if is_mutating(req.method()) {
            let content_type = req
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("");

            if !is_allowed(&self.allowed, content_type) {
                tracing::warn!(
                    method = %req.method(),
                    path = %req.path(),
                    content_type = %content_type,
                    "Rejected unsupported media type"
                );

                let response =
                    AppError::UnsupportedMediaType(self.allowed.to_vec()).error_response();
                let (http_req, _payload) = req.into_parts();
                let srv_response = ServiceResponse::new(http_req, response);

                return Box::pin(async move { Ok(srv_response.map_into_right_body()) });
            }
        }

        let fut = self.service.call(req);
        Box::pin(async move {
            let res = fut.await?;
            Ok(res.map_into_left_body())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allowed() -> Vec<String> {
        vec![
            "application/json".to_string(),
            "application/x-www-form-urlencoded".to_string(),
        ]
    }

    #[test]
    fn exact_values_are_allowed() {
        assert!(is_allowed(&allowed(), "application/json"));
        assert!(is_allowed(&allowed(), "application/x-www-form-urlencoded"));
    }

    #[test]
    fn parameters_and_other_types_are_rejected() {
        assert!(!is_allowed(&allowed(), "application/json; charset=utf-8"));
        assert!(!is_allowed(&allowed(), "text/plain"));
        assert!(!is_allowed(&allowed(), ""));
    }

    #[test]
    fn only_mutating_methods_are_checked() {
        assert!(is_mutating(&Method::POST));
        assert!(is_mutating(&Method::PUT));
        assert!(is_mutating(&Method::PATCH));
        assert!(!is_mutating(&Method::GET));
        assert!(!is_mutating(&Method::DELETE));
    }
}
