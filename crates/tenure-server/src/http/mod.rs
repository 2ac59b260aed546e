mod routes;

pub use routes::create_router;

use crate::llm::OllamaClient;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::sync::Arc;
use tenure_core::{JsonContractStore, JsonSessionStore, TenureError};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub contracts: Arc<JsonContractStore>,
    pub sessions: Arc<JsonSessionStore>,
    pub llm: Arc<OllamaClient>,
    pub start_time: std::time::Instant,
}

/// Error envelope used for every failed request
#[derive(Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

/// Wraps a domain error and maps the taxonomy onto status codes:
/// validation → 400, unknown ids → 404, upstream/persistence → 500.
pub struct AppError(TenureError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            TenureError::Validation(_) => StatusCode::BAD_REQUEST,
            TenureError::ContractNotFound(_) | TenureError::SessionNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            TenureError::Upstream(_) | TenureError::Io(_) | TenureError::Serialization(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("request failed: {}", self.0);
        }

        (
            status,
            Json(ErrorResponse {
                success: false,
                error: self.0.to_string(),
            }),
        )
            .into_response()
    }
}

impl From<TenureError> for AppError {
    fn from(err: TenureError) -> Self {
        Self(err)
    }
}

pub type AppResult<T> = Result<T, AppError>;
