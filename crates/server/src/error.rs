use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::repositories::StoreError;

/// Body sent with every 500 response
pub const INTERNAL_ERROR_BODY: &str = "500 - Internal Server Error!\n";

/// Unified application error type
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Details stay in the log; clients get a fixed plain-text body
        tracing::error!("{}", self);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            INTERNAL_ERROR_BODY,
        )
            .into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
