use axum::{http::StatusCode, response::Json};
use serde::Serialize;
use std::sync::Arc;

use crate::logic::{AdmissionError, AdmissionServices};

pub type AppState<S> = Arc<AdmissionServices<S>>;

/// Error half of every handler result.
pub type ApiError = (StatusCode, Json<ErrorResponse>);

/// Simple health check endpoint
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: &str) -> Self {
        Self {
            error: message.to_string(),
        }
    }
}

impl From<AdmissionError> for (StatusCode, Json<ErrorResponse>) {
    fn from(err: AdmissionError) -> Self {
        let status = match &err {
            AdmissionError::NotFound(_) => StatusCode::NOT_FOUND,
            AdmissionError::AlreadyExists(_) => StatusCode::CONFLICT,
            AdmissionError::Store(e) => {
                log::error!("Store failure: {:#}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, Json(ErrorResponse::new(&err.to_string())))
    }
}

/// Body returned by the delete endpoints.
pub(crate) fn deleted(message: String) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "success": true,
        "message": message
    }))
}
