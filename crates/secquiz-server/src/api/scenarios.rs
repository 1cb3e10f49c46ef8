//! Scenario catalog endpoints.

use actix_web::{get, web, HttpResponse};
use serde::{Deserialize, Serialize};

use secquiz_core::model::{Scenario, ScenarioCategory};

use super::error::ApiError;
use crate::AppState;

/// A catalog scenario annotated with the category it scores under.
#[derive(Debug, Serialize, Deserialize)]
pub struct ScenarioSummary {
    #[serde(flatten)]
    pub scenario: Scenario,
    pub category: ScenarioCategory,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ScenarioListResponse {
    pub scenarios: Vec<ScenarioSummary>,
    pub total_count: usize,
}

fn summarize(state: &AppState, scenario: &Scenario) -> ScenarioSummary {
    ScenarioSummary {
        scenario: scenario.clone(),
        category: state.engine.classify(scenario),
    }
}

/// List every scenario in the loaded catalog.
#[get("/v1/scenarios")]
pub async fn list_scenarios(state: web::Data<AppState>) -> HttpResponse {
    let scenarios: Vec<ScenarioSummary> = state
        .catalog
        .iter()
        .map(|s| summarize(&state, s))
        .collect();

    HttpResponse::Ok().json(ScenarioListResponse {
        total_count: scenarios.len(),
        scenarios,
    })
}

/// Get one scenario by id.
#[get("/v1/scenarios/{id}")]
pub async fn get_scenario(
    state: web::Data<AppState>,
    path: web::Path<u32>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let scenario = state
        .catalog
        .get(id)
        .ok_or(ApiError::ScenarioNotFound(id))?;

    Ok(HttpResponse::Ok().json(summarize(&state, scenario)))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_scenarios).service(get_scenario);
}
