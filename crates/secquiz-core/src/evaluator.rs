//! Response evaluation against a taxonomy entry.
//!
//! Produces [`RawMetrics`]: keyword and concept coverage plus the 0–10
//! score. Text rendering lives in [`crate::formatter`].

use serde::{Deserialize, Serialize};

use crate::model::ScenarioCategory;
use crate::taxonomy::ConceptEntry;

/// Responses shorter than this (after trimming) are low quality.
pub const MIN_RESPONSE_CHARS: usize = 20;

/// Responses with fewer words than this need at least one keyword.
pub const MIN_WORDS_WITHOUT_KEYWORDS: usize = 10;

/// Weight of keyword coverage in the score.
pub const KEYWORD_WEIGHT: f64 = 0.4;

/// Weight of concept coverage in the score.
pub const CONCEPT_WEIGHT: f64 = 0.6;

/// Lowest score a response past the low-quality check can get.
pub const MIN_SCORED: u8 = 1;

/// Highest possible score.
pub const MAX_SCORE: u8 = 10;

/// Coverage measurements for one response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawMetrics {
    pub category: ScenarioCategory,
    /// Whitespace-delimited tokens in the trimmed response.
    pub word_count: usize,
    pub is_low_quality: bool,
    /// Keywords found in the response, in taxonomy order.
    pub matched_keywords: Vec<String>,
    pub covered_concepts: Vec<String>,
    pub missed_concepts: Vec<String>,
    /// 0 for low-quality responses, otherwise 1–10.
    pub score: u8,
}

/// Feedback band selected from the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackTier {
    Excellent,
    Good,
    Developing,
}

impl FeedbackTier {
    /// Excellent at 8+, good at 6+, developing below.
    pub fn from_score(score: u8) -> Self {
        if score >= 8 {
            FeedbackTier::Excellent
        } else if score >= 6 {
            FeedbackTier::Good
        } else {
            FeedbackTier::Developing
        }
    }
}

/// Discriminated scoring outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Too short or no signal; scored 0.
    LowQuality,
    Scored { score: u8, tier: FeedbackTier },
}

impl RawMetrics {
    pub fn outcome(&self) -> Outcome {
        if self.is_low_quality {
            Outcome::LowQuality
        } else {
            Outcome::Scored {
                score: self.score,
                tier: FeedbackTier::from_score(self.score),
            }
        }
    }

    /// Fraction of the category's concepts the response covered.
    pub fn concept_coverage(&self) -> f64 {
        let total = self.covered_concepts.len() + self.missed_concepts.len();
        if total == 0 {
            return 0.0;
        }
        self.covered_concepts.len() as f64 / total as f64
    }
}

/// Score `response` against one taxonomy entry.
pub fn evaluate(entry: &ConceptEntry, response: &str) -> RawMetrics {
    let lowered = response.to_lowercase();
    let trimmed = response.trim();

    let word_count = trimmed.split_whitespace().count();
    let has_minimum_length = trimmed.chars().count() >= MIN_RESPONSE_CHARS;

    let matched_keywords: Vec<String> = entry
        .keywords
        .iter()
        .filter(|k| lowered.contains(k.as_str()))
        .cloned()
        .collect();

    let is_low_quality = !has_minimum_length
        || (word_count < MIN_WORDS_WITHOUT_KEYWORDS && matched_keywords.is_empty());

    if is_low_quality {
        tracing::debug!(
            category = %entry.category,
            word_count,
            "response flagged as low quality"
        );
        return RawMetrics {
            category: entry.category,
            word_count,
            is_low_quality,
            matched_keywords,
            covered_concepts: Vec::new(),
            missed_concepts: entry.concepts.clone(),
            score: 0,
        };
    }

    let (covered_concepts, missed_concepts): (Vec<String>, Vec<String>) = entry
        .concepts
        .iter()
        .cloned()
        .partition(|concept| concept_is_covered(concept, &lowered));

    let keyword_coverage = matched_keywords.len() as f64 / entry.keywords.len() as f64;
    let concept_coverage = covered_concepts.len() as f64 / entry.concepts.len() as f64;
    let score = weighted_score(keyword_coverage, concept_coverage);

    tracing::debug!(
        category = %entry.category,
        word_count,
        matched_keywords = matched_keywords.len(),
        covered_concepts = covered_concepts.len(),
        score,
        "response scored"
    );

    RawMetrics {
        category: entry.category,
        word_count,
        is_low_quality,
        matched_keywords,
        covered_concepts,
        missed_concepts,
        score,
    }
}

/// A concept counts as covered when any one of its words appears in the
/// lower-cased response. This is deliberately loose: "data" alone covers
/// "Data Loss Prevention (DLP) tools".
fn concept_is_covered(concept: &str, lowered_response: &str) -> bool {
    concept
        .to_lowercase()
        .split(' ')
        .any(|word| lowered_response.contains(word))
}

fn weighted_score(keyword_coverage: f64, concept_coverage: f64) -> u8 {
    let raw = (keyword_coverage * KEYWORD_WEIGHT + concept_coverage * CONCEPT_WEIGHT) * 10.0;
    // Half-up rounding; coverage is never negative.
    let rounded = (raw + 0.5).floor() as u8;
    rounded.clamp(MIN_SCORED, MAX_SCORE)
}
