use axum::{
    http::{HeaderValue, StatusCode, header::WWW_AUTHENTICATE},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::db::DbError;
use crate::models::ValidationError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Resource not found")]
    NotFound,
    #[error("{0}")]
    BadRequest(String),
    #[error("Invalid or missing admin credentials")]
    Unauthorized,
    #[error("Database error: {0}")]
    DatabaseError(sqlx::Error),
    #[error("Internal server error")]
    InternalError,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            ApiError::NotFound => (StatusCode::NOT_FOUND, self.to_string()),
            ApiError::BadRequest(detail) => (StatusCode::BAD_REQUEST, detail.clone()),
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, self.to_string()),
            ApiError::DatabaseError(err) => {
                tracing::error!(error = %err, "database request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error".to_string(),
                )
            }
            ApiError::InternalError => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
        };

        let body = Json(ErrorResponse {
            error: status.to_string(),
            message: error_message,
        });

        let mut response = (status, body).into_response();
        if matches!(self, ApiError::Unauthorized) {
            response.headers_mut().insert(
                WWW_AUTHENTICATE,
                HeaderValue::from_static(r#"Basic realm="Restricted""#),
            );
        }
        response
    }
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound => ApiError::NotFound,
            DbError::Sqlx(err) => ApiError::DatabaseError(err),
            DbError::Migration(err) => {
                tracing::error!(error = %err, "migration error surfaced in a request");
                ApiError::InternalError
            }
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}
