//! Core data model types for secquiz.
//!
//! These are the types shared by the classifier, evaluator, formatter and
//! every outer surface (HTTP, CLI, reports).

use serde::de::{Deserializer, IgnoredAny};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Maximum number of characters a user response may contain.
pub const MAX_RESPONSE_CHARS: usize = 1000;

/// Fixed set of scenario classification tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScenarioCategory {
    Phishing,
    Ransomware,
    Password,
    Database,
    SupplyChain,
    Network,
    Insider,
    Vulnerability,
    Physical,
    Mobile,
}

impl ScenarioCategory {
    /// Every category, in taxonomy order.
    pub const ALL: [ScenarioCategory; 10] = [
        ScenarioCategory::Phishing,
        ScenarioCategory::Ransomware,
        ScenarioCategory::Password,
        ScenarioCategory::Database,
        ScenarioCategory::SupplyChain,
        ScenarioCategory::Network,
        ScenarioCategory::Insider,
        ScenarioCategory::Vulnerability,
        ScenarioCategory::Physical,
        ScenarioCategory::Mobile,
    ];

    /// The camelCase wire name (e.g. "supplyChain").
    pub fn as_str(&self) -> &'static str {
        match self {
            ScenarioCategory::Phishing => "phishing",
            ScenarioCategory::Ransomware => "ransomware",
            ScenarioCategory::Password => "password",
            ScenarioCategory::Database => "database",
            ScenarioCategory::SupplyChain => "supplyChain",
            ScenarioCategory::Network => "network",
            ScenarioCategory::Insider => "insider",
            ScenarioCategory::Vulnerability => "vulnerability",
            ScenarioCategory::Physical => "physical",
            ScenarioCategory::Mobile => "mobile",
        }
    }
}

impl fmt::Display for ScenarioCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScenarioCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "phishing" => Ok(ScenarioCategory::Phishing),
            "ransomware" => Ok(ScenarioCategory::Ransomware),
            "password" => Ok(ScenarioCategory::Password),
            "database" => Ok(ScenarioCategory::Database),
            "supplychain" => Ok(ScenarioCategory::SupplyChain),
            "network" => Ok(ScenarioCategory::Network),
            "insider" => Ok(ScenarioCategory::Insider),
            "vulnerability" => Ok(ScenarioCategory::Vulnerability),
            "physical" => Ok(ScenarioCategory::Physical),
            "mobile" => Ok(ScenarioCategory::Mobile),
            _ => Err(format!("unknown scenario category: {s}")),
        }
    }
}

/// A security incident presented to the learner.
///
/// Only `title` and `description` feed the scorer and must be strings. The
/// other fields are informational; a null or wrongly typed value decodes as
/// empty rather than rejecting the scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    /// Catalog identifier. Absent when a caller posts an ad-hoc scenario.
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<u32>,
    /// Short headline, the main classification signal.
    pub title: String,
    /// Affected organization.
    #[serde(default, deserialize_with = "lenient_string")]
    pub organization: String,
    /// When the incident happened (free text, e.g. "March 2023").
    #[serde(default, deserialize_with = "lenient_string")]
    pub date: String,
    /// What happened.
    pub description: String,
    /// Consequences of the incident.
    #[serde(default, deserialize_with = "lenient_string")]
    pub impact: String,
}

/// Either a well-typed value or anything else, which is discarded.
#[derive(Deserialize)]
#[serde(untagged)]
enum Lenient<T> {
    Typed(T),
    Other(IgnoredAny),
}

fn lenient_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
    Ok(match Lenient::<u32>::deserialize(deserializer)? {
        Lenient::Typed(id) => Some(id),
        Lenient::Other(_) => None,
    })
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Lenient::<String>::deserialize(deserializer)? {
        Lenient::Typed(s) => s,
        Lenient::Other(_) => String::new(),
    })
}

/// Structured evaluation returned to the learner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// What the response did well.
    pub strengths: Vec<String>,
    /// Concepts the response missed.
    pub gaps: Vec<String>,
    /// Next steps for the learner.
    pub suggestions: Vec<String>,
    /// Score from 0 to 10.
    pub score: u8,
    /// One-paragraph summary.
    pub overall_feedback: String,
}

/// Cut a response down to [`MAX_RESPONSE_CHARS`] characters.
///
/// Callers apply this before handing text to the engine; the engine itself
/// assumes bounded input.
pub fn bound_response(response: &str) -> &str {
    match response.char_indices().nth(MAX_RESPONSE_CHARS) {
        Some((idx, _)) => &response[..idx],
        None => response,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_display_and_parse() {
        assert_eq!(ScenarioCategory::SupplyChain.to_string(), "supplyChain");
        assert_eq!(
            "supply-chain".parse::<ScenarioCategory>().unwrap(),
            ScenarioCategory::SupplyChain
        );
        assert_eq!(
            "supply_chain".parse::<ScenarioCategory>().unwrap(),
            ScenarioCategory::SupplyChain
        );
        assert_eq!(
            "Ransomware".parse::<ScenarioCategory>().unwrap(),
            ScenarioCategory::Ransomware
        );
        assert!("malware".parse::<ScenarioCategory>().is_err());
    }

    #[test]
    fn category_serializes_camel_case() {
        let json = serde_json::to_string(&ScenarioCategory::SupplyChain).unwrap();
        assert_eq!(json, "\"supplyChain\"");
        for category in ScenarioCategory::ALL {
            let parsed: ScenarioCategory = category.as_str().parse().unwrap();
            assert_eq!(parsed, category);
        }
    }

    #[test]
    fn analysis_result_uses_camel_case_keys() {
        let result = AnalysisResult {
            strengths: vec![],
            gaps: vec![],
            suggestions: vec![],
            score: 4,
            overall_feedback: "fine".into(),
        };
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["overallFeedback"], "fine");
        assert_eq!(value["score"], 4);
    }

    #[test]
    fn scenario_optional_fields_default() {
        let scenario: Scenario =
            serde_json::from_str(r#"{"title": "Ransomware Attack", "description": "x"}"#).unwrap();
        assert_eq!(scenario.id, None);
        assert!(scenario.organization.is_empty());
        assert!(scenario.impact.is_empty());
    }

    #[test]
    fn scenario_informational_fields_tolerate_odd_types() {
        let scenario: Scenario = serde_json::from_str(
            r#"{"id": "ransom-2", "title": "Ransomware Attack", "organization": null,
                "date": 2022, "impact": ["down"], "description": "x"}"#,
        )
        .unwrap();
        assert_eq!(scenario.id, None);
        assert_eq!(scenario.title, "Ransomware Attack");
        assert!(scenario.organization.is_empty());
        assert!(scenario.date.is_empty());
        assert!(scenario.impact.is_empty());

        let scenario: Scenario =
            serde_json::from_str(r#"{"id": 7, "title": "t", "description": "d"}"#).unwrap();
        assert_eq!(scenario.id, Some(7));
    }

    #[test]
    fn scenario_title_and_description_stay_strict() {
        assert!(serde_json::from_str::<Scenario>(r#"{"title": 5, "description": "d"}"#).is_err());
        assert!(serde_json::from_str::<Scenario>(r#"{"title": "t", "description": null}"#).is_err());
    }

    #[test]
    fn bound_response_truncates_on_char_boundary() {
        let long = "é".repeat(MAX_RESPONSE_CHARS + 5);
        let bounded = bound_response(&long);
        assert_eq!(bounded.chars().count(), MAX_RESPONSE_CHARS);
        assert_eq!(bound_response("short"), "short");
    }
}
