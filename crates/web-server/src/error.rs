use crate::responses::{ErrorBody, ErrorResponse};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

/// The three outcomes a handler can surface besides success.
///
/// `NotFound` is a logical outcome raised after a clean (possibly no-op)
/// commit; `OperationFailed` means the unit of work was rolled back. The
/// underlying database error is logged where the failure is mapped, and
/// only a stable code plus a generic message go over the wire.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("not found: {0}")]
    NotFound(&'static str),

    #[error("operation failed: {0}")]
    OperationFailed(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] database::DbError),
}

impl AppError {
    /// Wraps a rolled-back database failure under an endpoint-specific
    /// code, logging the real cause server-side.
    pub fn operation_failed(code: &'static str, err: database::DbError) -> Self {
        tracing::error!(error = ?err, code, "unit of work rolled back");
        AppError::OperationFailed(code)
    }
}

/// Converts our custom `AppError` into an HTTP response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::NotFound(code) => (
                StatusCode::NOT_FOUND,
                code,
                "The requested resource was not found".to_string(),
            ),
            AppError::OperationFailed(code) => (
                StatusCode::BAD_REQUEST,
                code,
                "The operation could not be completed".to_string(),
            ),
            AppError::Database(db_err) => {
                tracing::error!(error = ?db_err, "Database error.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal database error occurred".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            error: ErrorBody { code, message },
        });
        (status, body).into_response()
    }
}
