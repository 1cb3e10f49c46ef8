//! JSON error responses for the API.
//!
//! Scoring never produces an error; these cover lookups that fail.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Error body returned for every non-2xx response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error type/code
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Unique request ID for tracing
    pub request_id: String,
}

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ApiError {
    /// No scenario with this id in the loaded catalog (404)
    #[error("Scenario not found: {0}")]
    ScenarioNotFound(u32),
}

impl ApiError {
    fn error_type(&self) -> &'static str {
        match self {
            ApiError::ScenarioNotFound(_) => "scenario_not_found",
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::ScenarioNotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let request_id = Uuid::new_v4().to_string();

        tracing::error!(
            error_type = self.error_type(),
            status = status.as_u16(),
            request_id = %request_id,
            message = %self,
            "API error"
        );

        HttpResponse::build(status).json(ErrorResponse {
            error: self.error_type().to_string(),
            message: self.to_string(),
            request_id,
        })
    }
}
