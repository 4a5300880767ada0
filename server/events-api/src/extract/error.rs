use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

pub enum AppError {
    /// No events could be scraped and none were cached.
    Unavailable(anyhow::Error),
    Error(anyhow::Error),
}

impl<E> From<E> for AppError
where
    anyhow::Error: From<E>,
{
    fn from(value: E) -> Self {
        Self::Error(value.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Unavailable(error) => {
                error!("events unavailable: {error:?}");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    format!("Service Unavailable: {error}"),
                )
                    .into_response()
            }
            AppError::Error(error) => {
                error!("request failed: {error:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Internal Server Error: {error:?}"),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn test_status_codes() {
        let unavailable = AppError::Unavailable(anyhow!("all sources down")).into_response();
        assert_eq!(unavailable.status(), StatusCode::SERVICE_UNAVAILABLE);

        let parse: Result<i32, _> = "x".parse::<i32>();
        let internal = AppError::from(parse.unwrap_err()).into_response();
        assert_eq!(internal.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
