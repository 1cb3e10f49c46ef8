//! Grading report types with JSON persistence and regression detection.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::grading::GradedSubmission;
use crate::statistics::AggregateStats;

/// A complete grading report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradingReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// Where the submissions came from (usually a file path).
    pub source: String,
    /// Individual graded submissions.
    pub submissions: Vec<GradedSubmission>,
    /// Submissions skipped because their scenario was unknown.
    #[serde(default)]
    pub skipped: usize,
    /// Submissions dropped because an earlier one had the same id.
    #[serde(default)]
    pub duplicates: usize,
    /// Aggregate statistics.
    pub aggregate: AggregateStats,
    /// Total wall-clock duration in milliseconds.
    pub duration_ms: u64,
}

impl GradingReport {
    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: GradingReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }

    /// Render the report as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str(&format!("# Grading report `{}`\n\n", self.id));
        md.push_str(&format!(
            "**Source:** {} | **Graded:** {} | **Skipped:** {} | **Mean score:** {:.1} | **Median:** {:.1}\n\n",
            self.source,
            self.aggregate.count,
            self.skipped,
            self.aggregate.mean_score,
            self.aggregate.median_score
        ));

        md.push_str("| Submission | Scenario | Category | Score | Missed concepts |\n");
        md.push_str("|------------|----------|----------|-------|-----------------|\n");
        for s in &self.submissions {
            md.push_str(&format!(
                "| {} | {} | {} | {} | {} |\n",
                s.submission_id,
                s.scenario_title,
                s.category,
                s.result.score,
                s.metrics.missed_concepts.len()
            ));
        }

        md
    }

    /// Compare this report against a baseline to detect score changes.
    ///
    /// Submissions are matched by id; `threshold` is in score points.
    pub fn compare(&self, baseline: &GradingReport, threshold: f64) -> RegressionReport {
        let score_map = |report: &GradingReport| -> HashMap<String, u8> {
            let mut scores = HashMap::with_capacity(report.submissions.len());
            for s in &report.submissions {
                if scores.contains_key(&s.submission_id) {
                    tracing::warn!(
                        report = %report.id,
                        submission = %s.submission_id,
                        "duplicate submission id, comparing the first occurrence"
                    );
                    continue;
                }
                scores.insert(s.submission_id.clone(), s.result.score);
            }
            scores
        };

        let baseline_scores = score_map(baseline);
        let current_scores = score_map(self);

        let mut regressions = Vec::new();
        let mut improvements = Vec::new();
        let mut unchanged = 0usize;
        let mut new_submissions = 0usize;

        for (id, &current) in &current_scores {
            if let Some(&baseline_val) = baseline_scores.get(id) {
                let delta = current as f64 - baseline_val as f64;
                let change = ScoreChange {
                    submission_id: id.clone(),
                    baseline_score: baseline_val,
                    current_score: current,
                    delta,
                };
                if delta < -threshold {
                    regressions.push(change);
                } else if delta > threshold {
                    improvements.push(change);
                } else {
                    unchanged += 1;
                }
            } else {
                new_submissions += 1;
            }
        }

        let removed_submissions = baseline_scores
            .keys()
            .filter(|k| !current_scores.contains_key(*k))
            .count();

        regressions.sort_by(|a, b| a.submission_id.cmp(&b.submission_id));
        improvements.sort_by(|a, b| a.submission_id.cmp(&b.submission_id));

        RegressionReport {
            regressions,
            improvements,
            unchanged,
            new_submissions,
            removed_submissions,
        }
    }
}

/// Result of comparing two reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegressionReport {
    /// Submissions whose score went down.
    pub regressions: Vec<ScoreChange>,
    /// Submissions whose score went up.
    pub improvements: Vec<ScoreChange>,
    /// Submissions with no significant change.
    pub unchanged: usize,
    /// Submissions in current but not baseline.
    pub new_submissions: usize,
    /// Submissions in baseline but not current.
    pub removed_submissions: usize,
}

/// A score that moved between two reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreChange {
    pub submission_id: String,
    pub baseline_score: u8,
    pub current_score: u8,
    pub delta: f64,
}

impl RegressionReport {
    /// Format the regression report as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str(&format!(
            "**Summary:** {} regressions, {} improvements, {} unchanged\n\n",
            self.regressions.len(),
            self.improvements.len(),
            self.unchanged
        ));

        if !self.regressions.is_empty() {
            md.push_str("### Regressions\n\n");
            md.push_str("| Submission | Baseline | Current | Delta |\n");
            md.push_str("|------------|----------|---------|-------|\n");
            for r in &self.regressions {
                md.push_str(&format!(
                    "| {} | {} | {} | {:+} |\n",
                    r.submission_id, r.baseline_score, r.current_score, r.delta
                ));
            }
            md.push('\n');
        }

        if !self.improvements.is_empty() {
            md.push_str("### Improvements\n\n");
            md.push_str("| Submission | Baseline | Current | Delta |\n");
            md.push_str("|------------|----------|---------|-------|\n");
            for i in &self.improvements {
                md.push_str(&format!(
                    "| {} | {} | {} | {:+} |\n",
                    i.submission_id, i.baseline_score, i.current_score, i.delta
                ));
            }
        }

        md
    }

    /// Returns true if there are any regressions.
    pub fn has_regressions(&self) -> bool {
        !self.regressions.is_empty()
    }
}
