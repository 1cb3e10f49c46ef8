//! Human-readable rendering of [`RawMetrics`].
//!
//! Pure and deterministic: the same metrics and response always produce the
//! same [`AnalysisResult`].

use crate::evaluator::{FeedbackTier, Outcome, RawMetrics};
use crate::model::AnalysisResult;
use crate::taxonomy::ConceptEntry;

/// Responses longer than this earn the "detailed analysis" strength.
pub const DETAILED_RESPONSE_CHARS: usize = 200;

/// Scores below this add a "focus on these key areas" suggestion.
pub const FOCUS_SUGGESTION_BELOW: u8 = 7;

/// Maximum gaps listed on the normal path.
pub const MAX_GAPS: usize = 3;

const LOW_QUALITY_STRENGTH: &str = "Your response appears to contain non-meaningful text or lacks sufficient detail to identify security concepts";
const LOW_QUALITY_ELABORATE: &str = "Please provide a meaningful analysis of the security incident";
const LOW_QUALITY_PREVENTION: &str = "Consider what went wrong, what controls could have prevented it, and how to improve security";
const LOW_QUALITY_FEEDBACK: &str = "Your response does not contain enough detail to evaluate. Please provide a thoughtful analysis of the security scenario, including what went wrong and how it could have been prevented.";

const DETAILED_STRENGTH: &str = "You provided a detailed and thoughtful analysis";
const PREVENTION_STRENGTH: &str = "You focused on prevention strategies, which is excellent";
const GENERIC_STRENGTH: &str = "You provided a response and attempted to analyze the security incident";
const GENERIC_GAP: &str = "Consider exploring implementation challenges and organizational aspects";

const FRAMEWORK_SUGGESTIONS: [&str; 2] = [
    "Review security frameworks like NIST Cybersecurity Framework for comprehensive coverage",
    "Consider both technical controls and human factors in your analysis",
];

const EXCELLENT_FEEDBACK: &str = "Excellent analysis! You identified most of the key security concepts and demonstrated strong understanding of the incident.";
const GOOD_FEEDBACK: &str = "Good analysis with solid understanding. Focus on covering more specific technical controls and organizational processes to strengthen your response.";
const DEVELOPING_FEEDBACK: &str = "Your analysis shows security awareness, but consider exploring the technical and procedural controls in more depth for a more comprehensive evaluation.";

/// Render metrics for `response` into an [`AnalysisResult`].
pub fn format(entry: &ConceptEntry, response: &str, metrics: &RawMetrics) -> AnalysisResult {
    match metrics.outcome() {
        Outcome::LowQuality => low_quality(entry),
        Outcome::Scored { score, tier } => scored(response, metrics, score, tier),
    }
}

fn low_quality(entry: &ConceptEntry) -> AnalysisResult {
    AnalysisResult {
        strengths: vec![LOW_QUALITY_STRENGTH.to_string()],
        gaps: entry.concepts.clone(),
        suggestions: vec![
            LOW_QUALITY_ELABORATE.to_string(),
            LOW_QUALITY_PREVENTION.to_string(),
            format!("Focus on key areas like: {}", first_two(&entry.concepts)),
        ],
        score: 0,
        overall_feedback: LOW_QUALITY_FEEDBACK.to_string(),
    }
}

fn scored(response: &str, metrics: &RawMetrics, score: u8, tier: FeedbackTier) -> AnalysisResult {
    let mut strengths = Vec::new();
    if !metrics.covered_concepts.is_empty() {
        strengths.push(format!(
            "You identified key concepts: {}",
            first_two(&metrics.covered_concepts)
        ));
    }
    if response.chars().count() > DETAILED_RESPONSE_CHARS {
        strengths.push(DETAILED_STRENGTH.to_string());
    }
    if response.to_lowercase().contains("prevent") {
        strengths.push(PREVENTION_STRENGTH.to_string());
    }
    if strengths.is_empty() {
        strengths.push(GENERIC_STRENGTH.to_string());
    }

    let mut gaps: Vec<String> = metrics
        .missed_concepts
        .iter()
        .take(MAX_GAPS)
        .cloned()
        .collect();
    if gaps.is_empty() {
        gaps.push(GENERIC_GAP.to_string());
    }

    let mut suggestions: Vec<String> = FRAMEWORK_SUGGESTIONS.iter().map(|s| s.to_string()).collect();
    if score < FOCUS_SUGGESTION_BELOW {
        // Appended even when nothing was missed; the list is then empty.
        suggestions.push(format!(
            "Focus on these key areas: {}",
            first_two(&metrics.missed_concepts)
        ));
    }

    AnalysisResult {
        strengths,
        gaps,
        suggestions,
        score,
        overall_feedback: tier_feedback(tier).to_string(),
    }
}

/// The overall feedback sentence for a tier.
pub fn tier_feedback(tier: FeedbackTier) -> &'static str {
    match tier {
        FeedbackTier::Excellent => EXCELLENT_FEEDBACK,
        FeedbackTier::Good => GOOD_FEEDBACK,
        FeedbackTier::Developing => DEVELOPING_FEEDBACK,
    }
}

fn first_two(items: &[String]) -> String {
    items.iter().take(2).cloned().collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::evaluate;
    use crate::model::ScenarioCategory;
    use crate::taxonomy::Taxonomy;

    fn metrics(
        category: ScenarioCategory,
        covered: &[&str],
        missed: &[&str],
        score: u8,
    ) -> RawMetrics {
        RawMetrics {
            category,
            word_count: 12,
            is_low_quality: false,
            matched_keywords: vec![],
            covered_concepts: covered.iter().map(|s| s.to_string()).collect(),
            missed_concepts: missed.iter().map(|s| s.to_string()).collect(),
            score,
        }
    }

    #[test]
    fn low_quality_lists_every_concept() {
        let taxonomy = Taxonomy::builtin();
        let entry = taxonomy.entry(ScenarioCategory::Ransomware);
        let m = evaluate(entry, "ok");
        let result = format(entry, "ok", &m);

        assert_eq!(result.score, 0);
        assert_eq!(result.strengths, vec![LOW_QUALITY_STRENGTH.to_string()]);
        assert_eq!(result.gaps, entry.concepts);
        assert_eq!(result.suggestions.len(), 3);
        assert_eq!(
            result.suggestions[2],
            "Focus on key areas like: Regular security patches and updates, Air-gapped or offline backup systems"
        );
        assert_eq!(result.overall_feedback, LOW_QUALITY_FEEDBACK);
    }

    #[test]
    fn strengths_list_first_two_covered() {
        let taxonomy = Taxonomy::builtin();
        let entry = taxonomy.entry(ScenarioCategory::Password);
        let m = metrics(
            ScenarioCategory::Password,
            &["A", "B", "C"],
            &["D"],
            8,
        );
        let result = format(entry, "short text", &m);
        assert_eq!(result.strengths, vec!["You identified key concepts: A, B".to_string()]);
        assert_eq!(result.gaps, vec!["D".to_string()]);
        assert_eq!(result.suggestions.len(), 2);
        assert_eq!(result.overall_feedback, EXCELLENT_FEEDBACK);
    }

    #[test]
    fn detailed_and_prevention_strengths() {
        let taxonomy = Taxonomy::builtin();
        let entry = taxonomy.entry(ScenarioCategory::Phishing);
        let long = format!("{} PREVENTION matters", "x".repeat(DETAILED_RESPONSE_CHARS));
        let m = metrics(ScenarioCategory::Phishing, &[], &["A", "B", "C", "D"], 6);
        let result = format(entry, &long, &m);
        assert_eq!(
            result.strengths,
            vec![DETAILED_STRENGTH.to_string(), PREVENTION_STRENGTH.to_string()]
        );
        assert_eq!(result.overall_feedback, GOOD_FEEDBACK);
    }

    #[test]
    fn exactly_two_hundred_chars_is_not_detailed() {
        let taxonomy = Taxonomy::builtin();
        let entry = taxonomy.entry(ScenarioCategory::Phishing);
        let text = "y".repeat(DETAILED_RESPONSE_CHARS);
        let m = metrics(ScenarioCategory::Phishing, &[], &["A"], 3);
        let result = format(entry, &text, &m);
        assert_eq!(result.strengths, vec![GENERIC_STRENGTH.to_string()]);
    }

    #[test]
    fn gaps_capped_at_three() {
        let taxonomy = Taxonomy::builtin();
        let entry = taxonomy.entry(ScenarioCategory::Mobile);
        let m = metrics(ScenarioCategory::Mobile, &[], &["A", "B", "C", "D"], 2);
        let result = format(entry, "text", &m);
        assert_eq!(result.gaps, vec!["A", "B", "C"]);
        assert_eq!(
            result.suggestions.last().unwrap(),
            "Focus on these key areas: A, B"
        );
        assert_eq!(result.overall_feedback, DEVELOPING_FEEDBACK);
    }

    #[test]
    fn nothing_missed_uses_generic_gap() {
        let taxonomy = Taxonomy::builtin();
        let entry = taxonomy.entry(ScenarioCategory::Insider);
        let m = metrics(ScenarioCategory::Insider, &["A", "B", "C", "D"], &[], 6);
        let result = format(entry, "text", &m);
        assert_eq!(result.gaps, vec![GENERIC_GAP.to_string()]);
        // Score 6 still gets the focus suggestion, with nothing listed.
        assert_eq!(result.suggestions.last().unwrap(), "Focus on these key areas: ");
    }

    #[test]
    fn focus_suggestion_threshold() {
        let taxonomy = Taxonomy::builtin();
        let entry = taxonomy.entry(ScenarioCategory::Database);
        let at_seven = format(entry, "t", &metrics(ScenarioCategory::Database, &[], &["A"], 7));
        assert_eq!(at_seven.suggestions.len(), 2);
        let at_six = format(entry, "t", &metrics(ScenarioCategory::Database, &[], &["A"], 6));
        assert_eq!(at_six.suggestions.len(), 3);
    }

    #[test]
    fn formatting_is_deterministic() {
        let taxonomy = Taxonomy::builtin();
        let entry = taxonomy.entry(ScenarioCategory::Physical);
        let m = metrics(ScenarioCategory::Physical, &["A"], &["B", "C"], 5);
        assert_eq!(format(entry, "some text", &m), format(entry, "some text", &m));
    }
}
