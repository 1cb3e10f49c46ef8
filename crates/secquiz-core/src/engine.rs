//! Analysis engine: classifier, evaluator and formatter wired together.
//!
//! [`Engine::analyze`] is total. [`Engine::analyze_request`] takes an
//! untyped JSON body and degrades to [`fallback_result`] when the body is
//! malformed, so callers always get a well-formed [`AnalysisResult`].

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::classifier::classify;
use crate::error::RequestError;
use crate::evaluator::{evaluate, RawMetrics};
use crate::formatter::format;
use crate::model::{bound_response, AnalysisResult, Scenario, ScenarioCategory};
use crate::taxonomy::Taxonomy;

/// A decoded analyze request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub user_response: String,
    pub scenario: Scenario,
}

impl AnalyzeRequest {
    /// Decode a request body, reporting exactly what is wrong with it.
    pub fn from_json(body: &[u8]) -> Result<Self, RequestError> {
        let value: Value = serde_json::from_slice(body)?;
        Self::from_value(value)
    }

    /// Decode an already-parsed JSON value.
    pub fn from_value(mut value: Value) -> Result<Self, RequestError> {
        let user_response = match value.get_mut("userResponse").map(Value::take) {
            None | Some(Value::Null) => return Err(RequestError::MissingField("userResponse")),
            Some(Value::String(s)) => s,
            Some(_) => {
                return Err(RequestError::WrongType {
                    field: "userResponse",
                    expected: "string",
                })
            }
        };

        let scenario = match value.get_mut("scenario").map(Value::take) {
            None | Some(Value::Null) => return Err(RequestError::MissingField("scenario")),
            Some(v @ Value::Object(_)) => serde_json::from_value::<Scenario>(v)?,
            Some(_) => {
                return Err(RequestError::WrongType {
                    field: "scenario",
                    expected: "object",
                })
            }
        };

        Ok(Self {
            user_response,
            scenario,
        })
    }
}

/// Everything computed for one response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analysis {
    pub category: ScenarioCategory,
    pub metrics: RawMetrics,
    pub result: AnalysisResult,
}

/// The scoring engine. Cheap to clone; the taxonomy is shared.
#[derive(Debug, Clone)]
pub struct Engine {
    taxonomy: Arc<Taxonomy>,
}

impl Engine {
    pub fn new(taxonomy: Taxonomy) -> Self {
        Self {
            taxonomy: Arc::new(taxonomy),
        }
    }

    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    /// Classify a scenario into a category.
    pub fn classify(&self, scenario: &Scenario) -> ScenarioCategory {
        classify(scenario)
    }

    /// Compute coverage metrics for a response under `category`.
    pub fn evaluate(&self, category: ScenarioCategory, response: &str) -> RawMetrics {
        evaluate(self.taxonomy.entry(category), response)
    }

    /// Classify, evaluate and format, keeping the intermediate values.
    pub fn analyze_detailed(&self, response: &str, scenario: &Scenario) -> Analysis {
        let category = self.classify(scenario);
        let entry = self.taxonomy.entry(category);
        let metrics = evaluate(entry, response);
        let result = format(entry, response, &metrics);
        Analysis {
            category,
            metrics,
            result,
        }
    }

    /// Score a response to a scenario.
    pub fn analyze(&self, response: &str, scenario: &Scenario) -> AnalysisResult {
        self.analyze_detailed(response, scenario).result
    }

    /// Score a raw JSON request body `{userResponse, scenario}`.
    ///
    /// Never fails: malformed bodies get [`fallback_result`]. Responses
    /// longer than [`crate::model::MAX_RESPONSE_CHARS`] are truncated.
    pub fn analyze_request(&self, body: &[u8]) -> AnalysisResult {
        match AnalyzeRequest::from_json(body) {
            Ok(request) => {
                self.analyze(bound_response(&request.user_response), &request.scenario)
            }
            Err(e) => {
                tracing::warn!(error = %e, "malformed analyze request, returning fallback result");
                fallback_result()
            }
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(Taxonomy::builtin())
    }
}

/// The result returned when a request cannot be analyzed.
pub fn fallback_result() -> AnalysisResult {
    AnalysisResult {
        strengths: vec!["You provided a thoughtful analysis of the security scenario.".to_string()],
        gaps: vec![
            "Consider exploring more specific technical controls that could have prevented this incident.".to_string(),
            "Think about the organizational and process improvements needed beyond just technical solutions.".to_string(),
        ],
        suggestions: vec![
            "Review common security frameworks like NIST or CIS Controls for comprehensive prevention strategies.".to_string(),
            "Consider both preventive and detective controls in your analysis.".to_string(),
        ],
        score: 6,
        overall_feedback: "Your analysis shows good security awareness. To improve, focus on identifying specific technical controls and organizational processes that address each vulnerability.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MAX_RESPONSE_CHARS;

    const RANSOMWARE_ANSWER: &str = "We should have had air-gapped backups and applied patches immediately to prevent this ransomware incident";

    fn ransomware_scenario() -> Scenario {
        Scenario {
            id: Some(2),
            title: "Ransomware Attack".into(),
            organization: "City of Riverside".into(),
            date: "November 2022".into(),
            description: "A city employee clicked on an attachment.".into(),
            impact: "Services were disrupted.".into(),
        }
    }

    #[test]
    fn analyze_ransomware_example() {
        let engine = Engine::default();
        let result = engine.analyze(RANSOMWARE_ANSWER, &ransomware_scenario());
        assert!(result.score > 5);
        assert!(result
            .strengths
            .iter()
            .any(|s| s == "You focused on prevention strategies, which is excellent"));
        assert_eq!(result.gaps, vec!["Network segmentation".to_string()]);
    }

    #[test]
    fn analyze_detailed_exposes_category_and_metrics() {
        let engine = Engine::default();
        let analysis = engine.analyze_detailed(RANSOMWARE_ANSWER, &ransomware_scenario());
        assert_eq!(analysis.category, ScenarioCategory::Ransomware);
        assert!(analysis.metrics.matched_keywords.contains(&"backup".to_string()));
        assert_eq!(analysis.result.score, analysis.metrics.score);
    }

    #[test]
    fn analyze_is_idempotent() {
        let engine = Engine::default();
        let scenario = ransomware_scenario();
        assert_eq!(
            engine.analyze(RANSOMWARE_ANSWER, &scenario),
            engine.analyze(RANSOMWARE_ANSWER, &scenario)
        );
    }

    #[test]
    fn request_with_valid_body_is_scored() {
        let engine = Engine::default();
        let body = serde_json::json!({
            "userResponse": RANSOMWARE_ANSWER,
            "scenario": {"title": "Ransomware Attack", "description": "files encrypted"}
        });
        let result = engine.analyze_request(body.to_string().as_bytes());
        assert_eq!(result.score, 6);
    }

    #[test]
    fn request_with_odd_informational_fields_is_scored() {
        let engine = Engine::default();
        let expected = engine.analyze(RANSOMWARE_ANSWER, &ransomware_scenario());
        let scenarios = [
            serde_json::json!({"id": "ransom-2", "title": "Ransomware Attack", "description": "x"}),
            serde_json::json!({"title": "Ransomware Attack", "organization": null, "description": "x"}),
            serde_json::json!({"title": "Ransomware Attack", "date": 2022, "description": "x"}),
        ];
        for scenario in scenarios {
            let body = serde_json::json!({"userResponse": RANSOMWARE_ANSWER, "scenario": scenario});
            let result = engine.analyze_request(body.to_string().as_bytes());
            assert_ne!(result, fallback_result(), "scenario: {scenario}");
            assert_eq!(result, expected);
            assert_eq!(result.gaps, vec!["Network segmentation".to_string()]);
        }
    }

    #[test]
    fn request_low_quality_scores_zero() {
        let engine = Engine::default();
        let body = r#"{"userResponse": "ok", "scenario": {"title": "Ransomware Attack", "description": ""}}"#;
        assert_eq!(engine.analyze_request(body.as_bytes()).score, 0);
    }

    #[test]
    fn malformed_requests_get_fallback() {
        let engine = Engine::default();
        let bodies = [
            "not json",
            "{}",
            r#"{"userResponse": 42, "scenario": {"title": "x", "description": "y"}}"#,
            r#"{"userResponse": "hello there", "scenario": null}"#,
            r#"{"userResponse": "hello there", "scenario": "Ransomware"}"#,
            r#"{"userResponse": "hello there", "scenario": {"description": "no title"}}"#,
        ];
        for body in bodies {
            assert_eq!(
                engine.analyze_request(body.as_bytes()),
                fallback_result(),
                "body: {body}"
            );
        }
    }

    #[test]
    fn request_errors_name_the_problem() {
        assert!(matches!(
            AnalyzeRequest::from_json(br#"{"scenario": {}}"#),
            Err(RequestError::MissingField("userResponse"))
        ));
        assert!(matches!(
            AnalyzeRequest::from_json(br#"{"userResponse": "x"}"#),
            Err(RequestError::MissingField("scenario"))
        ));
        assert!(matches!(
            AnalyzeRequest::from_json(br#"{"userResponse": [], "scenario": {}}"#),
            Err(RequestError::WrongType {
                field: "userResponse",
                ..
            })
        ));
        assert!(matches!(
            AnalyzeRequest::from_json(b"{"),
            Err(RequestError::InvalidJson(_))
        ));
    }

    #[test]
    fn fallback_result_shape() {
        let fallback = fallback_result();
        assert_eq!(fallback.score, 6);
        assert_eq!(fallback.strengths.len(), 1);
        assert_eq!(fallback.gaps.len(), 2);
        assert_eq!(fallback.suggestions.len(), 2);
        assert!(fallback.overall_feedback.contains("good security awareness"));
    }

    #[test]
    fn oversized_response_is_bounded() {
        let engine = Engine::default();
        let long = format!("{} {}", RANSOMWARE_ANSWER, "z".repeat(MAX_RESPONSE_CHARS * 2));
        let body = serde_json::json!({
            "userResponse": long,
            "scenario": {"title": "Ransomware Attack", "description": ""}
        });
        let result = engine.analyze_request(body.to_string().as_bytes());
        assert!((1..=10).contains(&result.score));
    }

    #[test]
    fn scores_stay_in_range() {
        let engine = Engine::default();
        let scenario = ransomware_scenario();
        let responses = [
            "",
            "ok",
            "a b c d e f g h i jk",
            RANSOMWARE_ANSWER,
            "ransomware backup patch update segmentation air-gap antivirus endpoint malware network",
        ];
        for response in responses {
            let result = engine.analyze(response, &scenario);
            assert!(result.score <= 10, "{response}: {}", result.score);
        }
    }
}
