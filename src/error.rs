// SPDX-License-Identifier: MIT
// Copyright 2026 FlexCoach Developers

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid body")]
    InvalidBody,

    #[error("Missing headers")]
    MissingHeaders,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Missing configuration: {0}")]
    Config(&'static str),

    #[error("Gemini API error: {0}")]
    GeminiApi(String),

    #[error("Malformed AI output: {0}")]
    MalformedAiOutput(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::InvalidBody => (StatusCode::BAD_REQUEST, "invalid_body", None),
            AppError::MissingHeaders => (StatusCode::BAD_REQUEST, "missing_headers", None),
            AppError::InvalidSignature => {
                (StatusCode::BAD_REQUEST, "invalid_signature", None)
            }
            AppError::Config(name) => {
                tracing::error!(variable = name, "Missing configuration");
                (StatusCode::INTERNAL_SERVER_ERROR, "configuration_error", None)
            }
            AppError::GeminiApi(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "gemini_error",
                Some(msg.clone()),
            ),
            AppError::MalformedAiOutput(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "malformed_ai_output",
                Some(msg.clone()),
            ),
            AppError::Database(msg) => {
                tracing::error!(error = %msg, "Database error");
                (StatusCode::INTERNAL_SERVER_ERROR, "database_error", None)
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
