//! 核心错误处理模块

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::app::catalog::store::StoreError;

pub const NOT_FOUND_MESSAGE: &str = "Product not found!";

/// 核心错误类型
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("product with id={0} not found")]
    NotFound(i32),
    #[error("product with id={0} already exists")]
    Conflict(i32),
    #[error("invalid request: {0}")]
    Validation(String),
    #[error("storage failure: {0}")]
    Storage(String),
}

/// 错误响应结构
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub code: u16,
    pub timestamp: String,
}

impl CoreError {
    pub fn status(&self) -> StatusCode {
        match self {
            CoreError::NotFound(_) => StatusCode::NOT_FOUND,
            CoreError::Conflict(_) => StatusCode::CONFLICT,
            CoreError::Validation(_) => StatusCode::BAD_REQUEST,
            CoreError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for CoreError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (error_code, user_message) = match self {
            CoreError::NotFound(_) => ("NOT_FOUND", NOT_FOUND_MESSAGE.to_string()),
            CoreError::Conflict(id) => (
                "CONFLICT",
                format!("Product with id={} already exists!", id),
            ),
            CoreError::Validation(msg) => ("VALIDATION_ERROR", msg),
            CoreError::Storage(_) => ("STORAGE_ERROR", "Storage error".to_string()),
        };

        let error_response = ErrorResponse {
            error: error_code.to_string(),
            message: user_message,
            code: status.as_u16(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        (status, axum::Json(error_response)).into_response()
    }
}

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate(id) => CoreError::Conflict(id),
            StoreError::Database(e) => CoreError::Storage(e.to_string()),
        }
    }
}

impl From<JsonRejection> for CoreError {
    fn from(rejection: JsonRejection) -> Self {
        CoreError::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for CoreError {
    fn from(rejection: PathRejection) -> Self {
        CoreError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for CoreError {
    fn from(rejection: QueryRejection) -> Self {
        CoreError::Validation(rejection.body_text())
    }
}
