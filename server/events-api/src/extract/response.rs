use std::fmt::Debug;

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::debug;

use super::error::AppError;

/// A bare JSON body, `application/json; charset=utf-8`.
#[derive(Debug)]
pub struct JsonResponse<T>
where
    T: Debug + Serialize,
{
    pub body: T,
}

impl<T> JsonResponse<T>
where
    T: Debug + Serialize,
{
    pub fn new(body: T) -> Self {
        Self { body }
    }
}

impl<T> IntoResponse for JsonResponse<T>
where
    T: Debug + Serialize,
{
    fn into_response(self) -> Response {
        debug!("Response: {:?}", self.body);

        let body = match serde_json::to_string(&self.body) {
            Ok(body) => body,
            Err(e) => return AppError::from(e).into_response(),
        };
        let mut response = Response::new(body.into());
        *response.status_mut() = StatusCode::OK;
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json; charset=utf-8"),
        );
        response
    }
}
