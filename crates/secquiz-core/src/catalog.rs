//! Scenario catalog loading and validation.
//!
//! The catalog is the list of incidents the quiz presents. A default set of
//! ten scenarios is compiled in; hosts can point at their own TOML file.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::classifier::matching_rule;
use crate::model::Scenario;

const BUILTIN_CATALOG: &str = include_str!("../data/scenarios.toml");

/// Ordered collection of scenarios.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioCatalog {
    #[serde(default)]
    pub scenarios: Vec<Scenario>,
}

impl ScenarioCatalog {
    /// The scenarios bundled with secquiz.
    pub fn builtin() -> Result<Self> {
        parse_catalog_str(BUILTIN_CATALOG, Path::new("<builtin>/scenarios.toml"))
    }

    /// Look up a scenario by id.
    pub fn get(&self, id: u32) -> Option<&Scenario> {
        self.scenarios.iter().find(|s| s.id == Some(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Scenario> {
        self.scenarios.iter()
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }
}

/// Intermediate TOML structure for catalog files.
#[derive(Debug, Deserialize)]
struct TomlCatalogFile {
    #[serde(default)]
    scenarios: Vec<TomlScenario>,
}

#[derive(Debug, Deserialize)]
struct TomlScenario {
    id: u32,
    title: String,
    #[serde(default)]
    organization: String,
    #[serde(default)]
    date: String,
    description: String,
    #[serde(default)]
    impact: String,
}

/// Parse a single TOML file into a `ScenarioCatalog`.
pub fn parse_catalog(path: &Path) -> Result<ScenarioCatalog> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog file: {}", path.display()))?;

    parse_catalog_str(&content, path)
}

/// Parse a TOML string into a `ScenarioCatalog` (useful for testing).
pub fn parse_catalog_str(content: &str, source_path: &Path) -> Result<ScenarioCatalog> {
    let parsed: TomlCatalogFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let scenarios = parsed
        .scenarios
        .into_iter()
        .map(|s| Scenario {
            id: Some(s.id),
            title: s.title.trim().to_string(),
            organization: s.organization.trim().to_string(),
            date: s.date.trim().to_string(),
            description: s.description.trim().to_string(),
            impact: s.impact.trim().to_string(),
        })
        .collect();

    Ok(ScenarioCatalog { scenarios })
}

/// Load the catalog from `path`, or fall back to the bundled scenarios.
pub fn load_catalog(path: Option<&Path>) -> Result<ScenarioCatalog> {
    match path {
        Some(p) => parse_catalog(p),
        None => ScenarioCatalog::builtin(),
    }
}

/// A warning from catalog validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The scenario ID (if applicable).
    pub scenario_id: Option<u32>,
    /// Warning message.
    pub message: String,
}

/// Validate a catalog for common issues.
pub fn validate_catalog(catalog: &ScenarioCatalog) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if catalog.is_empty() {
        warnings.push(ValidationWarning {
            scenario_id: None,
            message: "catalog has no scenarios".into(),
        });
    }

    let mut seen_ids = HashSet::new();
    for scenario in catalog.iter() {
        if let Some(id) = scenario.id {
            if !seen_ids.insert(id) {
                warnings.push(ValidationWarning {
                    scenario_id: Some(id),
                    message: format!("duplicate scenario ID: {id}"),
                });
            }
        }

        if scenario.title.trim().is_empty() {
            warnings.push(ValidationWarning {
                scenario_id: scenario.id,
                message: "empty title".into(),
            });
        }

        if scenario.description.trim().is_empty() {
            warnings.push(ValidationWarning {
                scenario_id: scenario.id,
                message: "empty description".into(),
            });
        }

        if matching_rule(scenario).is_none() {
            warnings.push(ValidationWarning {
                scenario_id: scenario.id,
                message: format!(
                    "'{}' matches no classifier rule and will be scored as phishing",
                    scenario.title
                ),
            });
        }
    }

    warnings
}
