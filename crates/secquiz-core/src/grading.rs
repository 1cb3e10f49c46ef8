//! Batch grading of learner submissions.
//!
//! Loads a TOML file of `[[submissions]]`, scores each against its catalog
//! scenario and collects the results into a [`GradingReport`].

use std::collections::HashSet;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::ScenarioCatalog;
use crate::engine::Engine;
use crate::evaluator::RawMetrics;
use crate::model::{bound_response, AnalysisResult, Scenario, ScenarioCategory};
use crate::report::GradingReport;
use crate::statistics::compute_aggregate_stats;

/// One learner answer to grade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    /// Unique identifier (e.g. learner + attempt).
    pub id: String,
    /// Catalog id of the scenario being answered.
    pub scenario_id: u32,
    /// The free-text answer.
    pub response: String,
}

/// A submission with its score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradedSubmission {
    pub submission_id: String,
    pub scenario_id: u32,
    pub scenario_title: String,
    pub category: ScenarioCategory,
    pub metrics: RawMetrics,
    pub result: AnalysisResult,
}

impl GradedSubmission {
    /// Score one submission against its scenario.
    pub fn grade(engine: &Engine, submission: &Submission, scenario: &Scenario) -> Self {
        let analysis = engine.analyze_detailed(bound_response(&submission.response), scenario);
        Self {
            submission_id: submission.id.clone(),
            scenario_id: submission.scenario_id,
            scenario_title: scenario.title.clone(),
            category: analysis.category,
            metrics: analysis.metrics,
            result: analysis.result,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TomlSubmissionsFile {
    #[serde(default)]
    submissions: Vec<Submission>,
}

/// Parse a submissions TOML file.
pub fn parse_submissions(path: &Path) -> Result<Vec<Submission>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read submissions file: {}", path.display()))?;

    parse_submissions_str(&content, path)
}

/// Parse submissions from a TOML string (useful for testing).
pub fn parse_submissions_str(content: &str, source_path: &Path) -> Result<Vec<Submission>> {
    let parsed: TomlSubmissionsFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;
    Ok(parsed.submissions)
}

/// Grade every submission whose scenario exists in `catalog`.
///
/// Submissions referencing unknown scenarios are skipped and counted, as are
/// repeats of an id already graded (the first occurrence wins).
pub fn grade_submissions(
    engine: &Engine,
    catalog: &ScenarioCatalog,
    submissions: &[Submission],
    source: &str,
) -> GradingReport {
    let start = Instant::now();
    let mut graded = Vec::with_capacity(submissions.len());
    let mut skipped = 0usize;
    let mut duplicates = 0usize;
    let mut seen_ids = HashSet::new();

    for submission in submissions {
        if !seen_ids.insert(submission.id.as_str()) {
            tracing::warn!(
                submission = %submission.id,
                "duplicate submission id, keeping the first occurrence"
            );
            duplicates += 1;
            continue;
        }
        let Some(scenario) = catalog.get(submission.scenario_id) else {
            tracing::warn!(
                submission = %submission.id,
                scenario_id = submission.scenario_id,
                "scenario not found, skipping submission"
            );
            skipped += 1;
            continue;
        };
        graded.push(GradedSubmission::grade(engine, submission, scenario));
    }

    let aggregate = compute_aggregate_stats(&graded);

    tracing::info!(
        graded = graded.len(),
        skipped,
        duplicates,
        mean_score = aggregate.mean_score,
        "grading complete"
    );

    GradingReport {
        id: Uuid::new_v4(),
        created_at: chrono::Utc::now(),
        source: source.to_string(),
        submissions: graded,
        skipped,
        duplicates,
        aggregate,
        duration_ms: start.elapsed().as_millis() as u64,
    }
}
