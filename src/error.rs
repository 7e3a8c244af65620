use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug)]
pub enum AppError {
    Domain(larder_shared::Error),
    Internal(anyhow::Error),
}

impl From<larder_shared::Error> for AppError {
    fn from(value: larder_shared::Error) -> Self {
        Self::Domain(value)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(value: anyhow::Error) -> Self {
        Self::Internal(value)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        use larder_shared::Error;

        let (status, body) = match self {
            AppError::Domain(Error::Validate(errors)) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({ "error": errors.to_string() }),
            ),
            AppError::Domain(Error::NotFound(what)) => (
                StatusCode::NOT_FOUND,
                json!({ "error": format!("{what} not found") }),
            ),
            AppError::Domain(Error::Conflict(message)) => {
                (StatusCode::CONFLICT, json!({ "error": message }))
            }
            AppError::Domain(Error::InsufficientStock {
                ingredient_id,
                available,
                requested,
            }) => (
                StatusCode::CONFLICT,
                json!({
                    "error": "insufficient stock",
                    "ingredient_id": ingredient_id,
                    "available": available,
                    "requested": requested,
                }),
            ),
            AppError::Domain(Error::Server(message)) => {
                tracing::error!("server error: {message}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "internal server error" }),
                )
            }
            AppError::Domain(Error::Unknown(error)) => {
                tracing::error!("unexpected error: {error:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "internal server error" }),
                )
            }
            AppError::Internal(error) => {
                tracing::error!("unexpected error: {error:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "internal server error" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
