//! Scenario classification.
//!
//! Maps a scenario to a taxonomy category by walking an ordered rule list.
//! The first matching rule wins, so a title mentioning both phishing and
//! ransomware classifies as phishing.

use crate::model::{Scenario, ScenarioCategory};

/// One classification rule. Matches if any title term occurs in the
/// lower-cased title, or any description term in the lower-cased description.
#[derive(Debug, Clone, Copy)]
pub struct ClassifierRule {
    pub category: ScenarioCategory,
    pub title_terms: &'static [&'static str],
    pub description_terms: &'static [&'static str],
}

/// Rules in priority order.
pub const RULES: [ClassifierRule; 10] = [
    ClassifierRule {
        category: ScenarioCategory::Phishing,
        title_terms: &["phishing"],
        description_terms: &["phishing email"],
    },
    ClassifierRule {
        category: ScenarioCategory::Ransomware,
        title_terms: &["ransomware"],
        description_terms: &[],
    },
    ClassifierRule {
        category: ScenarioCategory::Password,
        title_terms: &["password"],
        description_terms: &[],
    },
    ClassifierRule {
        category: ScenarioCategory::Database,
        title_terms: &["database"],
        description_terms: &[],
    },
    ClassifierRule {
        category: ScenarioCategory::SupplyChain,
        title_terms: &["supply chain"],
        description_terms: &[],
    },
    ClassifierRule {
        category: ScenarioCategory::Network,
        title_terms: &["wi-fi", "wifi"],
        description_terms: &[],
    },
    ClassifierRule {
        category: ScenarioCategory::Insider,
        title_terms: &["insider"],
        description_terms: &[],
    },
    ClassifierRule {
        category: ScenarioCategory::Vulnerability,
        title_terms: &["vulnerability", "unpatched"],
        description_terms: &[],
    },
    ClassifierRule {
        category: ScenarioCategory::Physical,
        title_terms: &["physical"],
        description_terms: &[],
    },
    ClassifierRule {
        category: ScenarioCategory::Mobile,
        title_terms: &["mobile"],
        description_terms: &[],
    },
];

/// Category used when no rule matches.
pub const FALLBACK_CATEGORY: ScenarioCategory = ScenarioCategory::Phishing;

impl ClassifierRule {
    fn matches(&self, title: &str, description: &str) -> bool {
        self.title_terms.iter().any(|t| title.contains(t))
            || self.description_terms.iter().any(|t| description.contains(t))
    }
}

/// Return the first matching rule, or `None` if the scenario only
/// classifies through the fallback.
pub fn matching_rule(scenario: &Scenario) -> Option<&'static ClassifierRule> {
    let title = scenario.title.to_lowercase();
    let description = scenario.description.to_lowercase();
    RULES.iter().find(|rule| rule.matches(&title, &description))
}

/// Classify a scenario into a taxonomy category.
pub fn classify(scenario: &Scenario) -> ScenarioCategory {
    match matching_rule(scenario) {
        Some(rule) => rule.category,
        None => {
            tracing::debug!(title = %scenario.title, "no classifier rule matched, using fallback");
            FALLBACK_CATEGORY
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario(title: &str, description: &str) -> Scenario {
        Scenario {
            id: None,
            title: title.into(),
            organization: String::new(),
            date: String::new(),
            description: description.into(),
            impact: String::new(),
        }
    }

    #[test]
    fn classifies_each_rule() {
        let cases = [
            ("Phishing Email Compromise", ScenarioCategory::Phishing),
            ("Ransomware Attack", ScenarioCategory::Ransomware),
            ("Password Reuse Breach", ScenarioCategory::Password),
            ("Unsecured Database Exposure", ScenarioCategory::Database),
            ("Supply Chain Attack", ScenarioCategory::SupplyChain),
            ("Public Wi-Fi Credential Theft", ScenarioCategory::Network),
            ("Hotel WiFi Snooping", ScenarioCategory::Network),
            ("Insider Threat Data Exfiltration", ScenarioCategory::Insider),
            ("Unpatched Server Vulnerability", ScenarioCategory::Vulnerability),
            ("Unpatched Router", ScenarioCategory::Vulnerability),
            ("Social Engineering Physical Breach", ScenarioCategory::Physical),
            ("Mobile Device Compromise", ScenarioCategory::Mobile),
        ];
        for (title, expected) in cases {
            assert_eq!(classify(&scenario(title, "")), expected, "title: {title}");
        }
    }

    #[test]
    fn first_rule_wins() {
        let s = scenario("Phishing and Ransomware Combined Attack", "");
        assert_eq!(classify(&s), ScenarioCategory::Phishing);

        let s = scenario("Ransomware via Stolen Password", "");
        assert_eq!(classify(&s), ScenarioCategory::Ransomware);
    }

    #[test]
    fn description_only_checked_for_phishing_email() {
        let s = scenario("Wire Fraud", "The attacker sent a Phishing Email to finance.");
        assert_eq!(classify(&s), ScenarioCategory::Phishing);

        // Other rules only look at the title.
        let s = scenario("Mystery Outage", "ransomware encrypted every mobile device");
        assert!(matching_rule(&s).is_none());
    }

    #[test]
    fn description_phishing_beats_title_rules() {
        let s = scenario("Mobile Device Compromise", "It began with a phishing email.");
        assert_eq!(classify(&s), ScenarioCategory::Phishing);
    }

    #[test]
    fn unmatched_falls_back_to_phishing() {
        let s = scenario("Cloud Billing Surprise", "Costs spiked overnight.");
        assert!(matching_rule(&s).is_none());
        assert_eq!(classify(&s), ScenarioCategory::Phishing);
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(
            classify(&scenario("RANSOMWARE", "")),
            ScenarioCategory::Ransomware
        );
    }
}
