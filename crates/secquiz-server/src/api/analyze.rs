//! Analyze endpoints.
//!
//! Both routes answer 200 with an `AnalysisResult` for any body, falling
//! back to the fixed result when the body cannot be decoded.

use actix_web::{post, web, HttpResponse};
use serde_json::Value;

use secquiz_core::engine::fallback_result;
use secquiz_core::model::bound_response;

use super::error::ApiError;
use crate::AppState;

/// Score `{userResponse, scenario}`.
#[post("/api/analyze")]
pub async fn analyze(state: web::Data<AppState>, body: web::Bytes) -> HttpResponse {
    HttpResponse::Ok().json(state.engine.analyze_request(&body))
}

/// Score `{userResponse}` against a catalog scenario.
#[post("/v1/scenarios/{id}/analyze")]
pub async fn analyze_scenario(
    state: web::Data<AppState>,
    path: web::Path<u32>,
    body: web::Bytes,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let scenario = state
        .catalog
        .get(id)
        .ok_or(ApiError::ScenarioNotFound(id))?;

    let result = match user_response(&body) {
        Some(response) => state.engine.analyze(bound_response(&response), scenario),
        None => {
            tracing::warn!(scenario_id = id, "malformed analyze request, returning fallback result");
            fallback_result()
        }
    };

    Ok(HttpResponse::Ok().json(result))
}

fn user_response(body: &[u8]) -> Option<String> {
    match serde_json::from_slice::<Value>(body).ok()? {
        Value::Object(mut map) => match map.remove("userResponse")? {
            Value::String(s) => Some(s),
            _ => None,
        },
        _ => None,
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(analyze).service(analyze_scenario);
}
