//! API Error Types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use visit_core::StoreError;
use visit_qr::QrError;

/// JSON error body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

/// Errors returned by request handlers
#[derive(Error, Debug)]
pub enum ApiError {
    /// Establishment id not in the allow-list
    #[error("Restaurante/comercio '{0}' no encontrado")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Server(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),

    #[error("QR error: {0}")]
    Qr(#[from] QrError),

    #[error("Template error: {0}")]
    Render(#[from] askama::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Server(_)
            | ApiError::Storage(_)
            | ApiError::Qr(_)
            | ApiError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::Server(_) => "SERVER_ERROR",
            ApiError::Storage(_) => "STORAGE_ERROR",
            ApiError::Qr(_) => "QR_ERROR",
            ApiError::Render(_) => "RENDER_ERROR",
        }
    }

    /// Message safe to show to the client
    pub fn user_message(&self) -> String {
        match self {
            ApiError::NotFound(_) | ApiError::BadRequest(_) | ApiError::Server(_) => {
                self.to_string()
            }
            ApiError::Storage(_) => "No se pudo guardar el contador de visitas".into(),
            ApiError::Qr(_) => "Error al generar QR".into(),
            ApiError::Render(_) => "Error al generar la página".into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }

        let body = ErrorResponse {
            error: self.user_message(),
            code: self.code().into(),
        };

        (status, Json(body)).into_response()
    }
}
