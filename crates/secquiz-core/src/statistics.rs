//! Aggregate statistics over a batch of graded submissions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::evaluator::{FeedbackTier, Outcome};
use crate::grading::GradedSubmission;
use crate::model::ScenarioCategory;

/// Aggregate statistics across all graded submissions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregateStats {
    /// Number of graded submissions.
    pub count: usize,
    /// Mean score (0 when empty).
    pub mean_score: f64,
    /// Median score (0 when empty).
    pub median_score: f64,
    /// How many submissions landed in each feedback band.
    pub tiers: TierCounts,
    /// Per-category statistics.
    #[serde(default)]
    pub per_category: BTreeMap<ScenarioCategory, CategoryStats>,
}

/// Submission counts per feedback band.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierCounts {
    pub low_quality: usize,
    pub developing: usize,
    pub good: usize,
    pub excellent: usize,
}

/// Statistics for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryStats {
    pub count: usize,
    pub mean_score: f64,
    /// Average fraction of concepts covered.
    pub mean_concept_coverage: f64,
}

/// Median of a list of scores.
pub fn median(scores: &[u8]) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }
    let mut sorted = scores.to_vec();
    sorted.sort_unstable();
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] as f64 + sorted[mid] as f64) / 2.0
    } else {
        sorted[mid] as f64
    }
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if n == 0 {
        0.0
    } else {
        sum / n as f64
    }
}

/// Compute aggregate statistics from graded submissions.
pub fn compute_aggregate_stats(graded: &[GradedSubmission]) -> AggregateStats {
    let scores: Vec<u8> = graded.iter().map(|g| g.result.score).collect();

    let mut tiers = TierCounts::default();
    for g in graded {
        match g.metrics.outcome() {
            Outcome::LowQuality => tiers.low_quality += 1,
            Outcome::Scored { tier, .. } => match tier {
                FeedbackTier::Developing => tiers.developing += 1,
                FeedbackTier::Good => tiers.good += 1,
                FeedbackTier::Excellent => tiers.excellent += 1,
            },
        }
    }

    let mut by_category: BTreeMap<ScenarioCategory, Vec<&GradedSubmission>> = BTreeMap::new();
    for g in graded {
        by_category.entry(g.category).or_default().push(g);
    }

    let per_category = by_category
        .into_iter()
        .map(|(category, group)| {
            let stats = CategoryStats {
                count: group.len(),
                mean_score: mean(group.iter().map(|g| g.result.score as f64)),
                mean_concept_coverage: mean(group.iter().map(|g| g.metrics.concept_coverage())),
            };
            (category, stats)
        })
        .collect();

    AggregateStats {
        count: graded.len(),
        mean_score: mean(scores.iter().map(|&s| s as f64)),
        median_score: median(&scores),
        tiers,
        per_category,
    }
}
