//! Error handling for the roast simulator server
//!
//! Provides consistent error responses in English and Thai

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shared::RoastError;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Roast core errors
    #[error(transparent)]
    Roast(#[from] RoastError),

    // Validation errors
    #[error("Validation error: {message}")]
    Validation {
        field: String,
        message: String,
        message_th: String,
    },

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Session limit reached ({0} live sessions)")]
    SessionLimitReached(usize),

    // Internal errors
    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message_en: String,
    pub message_th: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let field = errors
            .field_errors()
            .keys()
            .next()
            .map(|f| f.to_string())
            .unwrap_or_default();
        AppError::Validation {
            message: format!("Invalid value for {}", field),
            message_th: format!("ค่าของ {} ไม่ถูกต้อง", field),
            field,
        }
    }
}

fn roast_error_detail(err: &RoastError) -> (StatusCode, ErrorDetail) {
    let code = err.code().to_string();
    match err {
        RoastError::InvalidParameter { parameter, reason } => (
            StatusCode::BAD_REQUEST,
            ErrorDetail {
                code,
                message_en: err.to_string(),
                message_th: format!("พารามิเตอร์ {} ไม่ถูกต้อง: {}", parameter, reason),
                field: Some(parameter.to_string()),
            },
        ),
        RoastError::InvalidTransition { .. } => (
            StatusCode::CONFLICT,
            ErrorDetail {
                code,
                message_en: err.to_string(),
                message_th: format!("ไม่สามารถเปลี่ยนสถานะได้: {}", err),
                field: None,
            },
        ),
        RoastError::NonMonotonicTimestamp { .. } => (
            StatusCode::CONFLICT,
            ErrorDetail {
                code,
                message_en: err.to_string(),
                message_th: "เวลาของเหตุการณ์ต้องไม่ย้อนกลับ".to_string(),
                field: Some("timestamp".to_string()),
            },
        ),
        RoastError::NoData(what) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            ErrorDetail {
                code,
                message_en: err.to_string(),
                message_th: format!("ยังไม่มีข้อมูล: {}", what),
                field: None,
            },
        ),
    }
}

impl AppError {
    fn status_and_detail(&self) -> (StatusCode, ErrorDetail) {
        match self {
            AppError::Roast(err) => roast_error_detail(err),
            AppError::Validation {
                field,
                message,
                message_th,
            } => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "VALIDATION_ERROR".to_string(),
                    message_en: message.clone(),
                    message_th: message_th.clone(),
                    field: Some(field.clone()),
                },
            ),
            AppError::NotFound(resource) => (
                StatusCode::NOT_FOUND,
                ErrorDetail {
                    code: "NOT_FOUND".to_string(),
                    message_en: format!("{} not found", resource),
                    message_th: format!("ไม่พบ {}", resource),
                    field: None,
                },
            ),
            AppError::SessionLimitReached(limit) => (
                StatusCode::CONFLICT,
                ErrorDetail {
                    code: "SESSION_LIMIT_REACHED".to_string(),
                    message_en: format!("At most {} roast sessions can be open", limit),
                    message_th: format!("เปิดเซสชันการคั่วได้สูงสุด {} เซสชัน", limit),
                    field: None,
                },
            ),
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "INTERNAL_ERROR".to_string(),
                    message_en: msg.clone(),
                    message_th: "เกิดข้อผิดพลาดภายในเซิร์ฟเวอร์".to_string(),
                    field: None,
                },
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_detail) = self.status_and_detail();

        if status.is_server_error() {
            tracing::error!("Error: {:?}", self);
        } else {
            tracing::warn!("Request rejected: {}", self);
        }

        (status, Json(ErrorResponse { error: error_detail })).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
