//! Concept taxonomy: the keywords and concepts each category is scored on.
//!
//! The taxonomy is built once (from the built-in table or a TOML file) and
//! then shared read-only. Every category always has at least one keyword and
//! one concept, so coverage ratios never divide by zero.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::TaxonomyError;
use crate::model::ScenarioCategory;

/// Keywords and concepts for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConceptEntry {
    pub category: ScenarioCategory,
    /// Lowercase lexical signals, unique within the entry.
    pub keywords: Vec<String>,
    /// Best-practice descriptions, in presentation order.
    pub concepts: Vec<String>,
}

/// Immutable category → entry table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Taxonomy {
    // One entry per category, stored in `ScenarioCategory::ALL` order.
    entries: Vec<ConceptEntry>,
}

type BuiltinEntry = (ScenarioCategory, &'static [&'static str], &'static [&'static str]);

const BUILTIN: [BuiltinEntry; 10] = [
    (
        ScenarioCategory::Phishing,
        &[
            "phishing",
            "email",
            "verify",
            "domain",
            "authentic",
            "social engineering",
            "awareness",
            "training",
        ],
        &[
            "Email verification and authentication",
            "Security awareness training",
            "Verification of requests through secondary channels",
            "Email filtering and anti-phishing tools",
        ],
    ),
    (
        ScenarioCategory::Ransomware,
        &[
            "ransomware",
            "backup",
            "patch",
            "update",
            "segmentation",
            "air-gap",
            "antivirus",
            "endpoint",
            "malware",
        ],
        &[
            "Regular security patches and updates",
            "Air-gapped or offline backup systems",
            "Network segmentation",
            "Endpoint protection and antivirus",
        ],
    ),
    (
        ScenarioCategory::Password,
        &[
            "password",
            "mfa",
            "multi-factor",
            "authentication",
            "2fa",
            "unique",
            "password manager",
            "credential",
        ],
        &[
            "Multi-factor authentication (MFA)",
            "Unique passwords for each account",
            "Password managers",
            "Regular password rotation",
        ],
    ),
    (
        ScenarioCategory::Database,
        &[
            "database",
            "misconfiguration",
            "access control",
            "authentication",
            "encryption",
            "audit",
            "monitoring",
            "security review",
        ],
        &[
            "Proper access controls and authentication",
            "Regular security audits",
            "Encryption at rest and in transit",
            "Configuration management and review processes",
        ],
    ),
    (
        ScenarioCategory::SupplyChain,
        &[
            "supply chain",
            "vendor",
            "third-party",
            "code review",
            "integrity",
            "verification",
            "trusted source",
            "vetting",
        ],
        &[
            "Vendor security assessment",
            "Code signing and integrity verification",
            "Build process security controls",
            "Trusted software sources",
        ],
    ),
    (
        ScenarioCategory::Network,
        &[
            "vpn",
            "encryption",
            "tls",
            "ssl",
            "public wifi",
            "man-in-the-middle",
            "mitm",
            "network security",
        ],
        &[
            "VPN usage on public networks",
            "Encrypted connections (TLS/SSL)",
            "Avoiding sensitive operations on untrusted networks",
            "Network security awareness",
        ],
    ),
    (
        ScenarioCategory::Insider,
        &[
            "insider",
            "access control",
            "dlp",
            "monitoring",
            "offboarding",
            "least privilege",
            "data loss",
        ],
        &[
            "Data Loss Prevention (DLP) tools",
            "Access control and least privilege",
            "Proper offboarding procedures",
            "User activity monitoring",
        ],
    ),
    (
        ScenarioCategory::Vulnerability,
        &[
            "vulnerability",
            "patch",
            "update",
            "cve",
            "emergency",
            "critical",
            "vulnerability management",
            "scanning",
        ],
        &[
            "Timely patch management",
            "Vulnerability scanning and assessment",
            "Emergency patching procedures for critical vulnerabilities",
            "Patch testing and deployment processes",
        ],
    ),
    (
        ScenarioCategory::Physical,
        &[
            "physical",
            "tailgating",
            "badge",
            "access control",
            "visitor",
            "security guard",
            "authentication",
            "mantra",
        ],
        &[
            "Physical access controls",
            "Anti-tailgating policies and training",
            "Visitor management procedures",
            "Security awareness for physical security",
        ],
    ),
    (
        ScenarioCategory::Mobile,
        &[
            "mobile",
            "app",
            "permission",
            "mdm",
            "device management",
            "byod",
            "app store",
            "vetting",
            "sandbox",
        ],
        &[
            "Mobile Device Management (MDM)",
            "App vetting and approval processes",
            "Permission reviews and least privilege",
            "BYOD security policies",
        ],
    ),
];

impl Taxonomy {
    /// The taxonomy bundled with secquiz.
    pub fn builtin() -> Self {
        let entries = BUILTIN
            .iter()
            .map(|(category, keywords, concepts)| ConceptEntry {
                category: *category,
                keywords: keywords.iter().map(|k| k.to_string()).collect(),
                concepts: concepts.iter().map(|c| c.to_string()).collect(),
            })
            .collect();
        Self { entries }
    }

    /// Build a taxonomy from arbitrary entries, enforcing the invariant.
    pub fn from_entries(
        entries: impl IntoIterator<Item = ConceptEntry>,
    ) -> Result<Self, TaxonomyError> {
        let mut by_category: HashMap<ScenarioCategory, ConceptEntry> = HashMap::new();
        for entry in entries {
            validate_entry(&entry)?;
            let category = entry.category;
            if by_category.insert(category, entry).is_some() {
                return Err(TaxonomyError::DuplicateCategory(category));
            }
        }

        let mut ordered = Vec::with_capacity(ScenarioCategory::ALL.len());
        for category in ScenarioCategory::ALL {
            let entry = by_category
                .remove(&category)
                .ok_or(TaxonomyError::MissingCategory(category))?;
            ordered.push(entry);
        }

        Ok(Self { entries: ordered })
    }

    /// The entry for a category.
    pub fn entry(&self, category: ScenarioCategory) -> &ConceptEntry {
        &self.entries[category as usize]
    }

    /// All entries, in category order.
    pub fn entries(&self) -> &[ConceptEntry] {
        &self.entries
    }
}

impl Default for Taxonomy {
    fn default() -> Self {
        Self::builtin()
    }
}

fn validate_entry(entry: &ConceptEntry) -> Result<(), TaxonomyError> {
    if entry.keywords.is_empty() {
        return Err(TaxonomyError::EmptyKeywords(entry.category));
    }
    if entry.concepts.is_empty() {
        return Err(TaxonomyError::EmptyConcepts(entry.category));
    }

    let mut seen = HashSet::new();
    for keyword in &entry.keywords {
        if *keyword != keyword.to_lowercase() {
            return Err(TaxonomyError::KeywordNotLowercase {
                category: entry.category,
                keyword: keyword.clone(),
            });
        }
        if !seen.insert(keyword.as_str()) {
            return Err(TaxonomyError::DuplicateKeyword {
                category: entry.category,
                keyword: keyword.clone(),
            });
        }
    }

    Ok(())
}

/// Intermediate TOML structure for taxonomy files.
#[derive(Debug, Deserialize)]
struct TomlTaxonomyFile {
    categories: HashMap<String, TomlConceptEntry>,
}

#[derive(Debug, Deserialize)]
struct TomlConceptEntry {
    #[serde(default)]
    keywords: Vec<String>,
    #[serde(default)]
    concepts: Vec<String>,
}

/// Load a taxonomy from a TOML file.
pub fn parse_taxonomy(path: &Path) -> Result<Taxonomy> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read taxonomy file: {}", path.display()))?;

    parse_taxonomy_str(&content, path)
}

/// Parse a taxonomy from a TOML string (useful for testing).
pub fn parse_taxonomy_str(content: &str, source_path: &Path) -> Result<Taxonomy> {
    let parsed: TomlTaxonomyFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let entries = parsed
        .categories
        .into_iter()
        .map(|(name, entry)| {
            let category: ScenarioCategory = name
                .parse()
                .map_err(|_| TaxonomyError::UnknownCategory(name.clone()))?;
            Ok(ConceptEntry {
                category,
                keywords: entry.keywords,
                concepts: entry.concepts,
            })
        })
        .collect::<Result<Vec<_>, TaxonomyError>>()
        .with_context(|| format!("invalid taxonomy: {}", source_path.display()))?;

    let taxonomy = Taxonomy::from_entries(entries)
        .with_context(|| format!("invalid taxonomy: {}", source_path.display()))?;

    tracing::debug!(
        path = %source_path.display(),
        categories = taxonomy.entries().len(),
        "loaded taxonomy"
    );

    Ok(taxonomy)
}

/// Load the taxonomy from `path`, or fall back to the built-in table.
pub fn load_taxonomy(path: Option<&Path>) -> Result<Taxonomy> {
    match path {
        Some(p) => parse_taxonomy(p),
        None => Ok(Taxonomy::builtin()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_toml(skip: Option<&str>) -> String {
        let mut out = String::new();
        for category in ScenarioCategory::ALL {
            if Some(category.as_str()) == skip {
                continue;
            }
            out.push_str(&format!(
                "[categories.{}]\nkeywords = [\"{}\"]\nconcepts = [\"Some concept\"]\n\n",
                category.as_str(),
                category.as_str().to_lowercase()
            ));
        }
        out
    }

    #[test]
    fn builtin_entries_are_non_empty() {
        let taxonomy = Taxonomy::builtin();
        assert_eq!(taxonomy.entries().len(), ScenarioCategory::ALL.len());
        for category in ScenarioCategory::ALL {
            let entry = taxonomy.entry(category);
            assert_eq!(entry.category, category);
            assert!(!entry.keywords.is_empty(), "{category} has no keywords");
            assert!(!entry.concepts.is_empty(), "{category} has no concepts");
        }
    }

    #[test]
    fn builtin_passes_validation() {
        let taxonomy = Taxonomy::builtin();
        let rebuilt = Taxonomy::from_entries(taxonomy.entries().to_vec()).unwrap();
        assert_eq!(rebuilt, taxonomy);
    }

    #[test]
    fn ransomware_entry_contents() {
        let taxonomy = Taxonomy::builtin();
        let entry = taxonomy.entry(ScenarioCategory::Ransomware);
        assert_eq!(entry.keywords.len(), 9);
        assert_eq!(entry.keywords[0], "ransomware");
        assert_eq!(entry.concepts[1], "Air-gapped or offline backup systems");
    }

    #[test]
    fn parse_complete_taxonomy() {
        let taxonomy = parse_taxonomy_str(&minimal_toml(None), Path::new("test.toml")).unwrap();
        let entry = taxonomy.entry(ScenarioCategory::SupplyChain);
        assert_eq!(entry.keywords, vec!["supplychain".to_string()]);
        assert_eq!(entry.concepts, vec!["Some concept".to_string()]);
    }

    #[test]
    fn parse_rejects_missing_category() {
        let err = parse_taxonomy_str(&minimal_toml(Some("mobile")), Path::new("test.toml"))
            .unwrap_err();
        assert!(format!("{err:#}").contains("mobile"), "got: {err:#}");
    }

    #[test]
    fn parse_rejects_unknown_category() {
        let content = format!(
            "{}[categories.malware]\nkeywords = [\"x\"]\nconcepts = [\"y\"]\n",
            minimal_toml(None)
        );
        let err = parse_taxonomy_str(&content, Path::new("test.toml")).unwrap_err();
        assert!(format!("{err:#}").contains("unknown category: malware"));
    }

    #[test]
    fn parse_rejects_category_spelled_twice() {
        let content = format!(
            "{}[categories.supply-chain]\nkeywords = [\"b\"]\nconcepts = [\"Other concept\"]\n",
            minimal_toml(None)
        );
        let err = parse_taxonomy_str(&content, Path::new("test.toml")).unwrap_err();
        assert!(
            format!("{err:#}").contains("category supplyChain is defined more than once"),
            "got: {err:#}"
        );
    }

    #[test]
    fn from_entries_rejects_duplicate_category() {
        let mut entries = Taxonomy::builtin().entries().to_vec();
        entries.push(entries[4].clone());
        assert!(matches!(
            Taxonomy::from_entries(entries),
            Err(TaxonomyError::DuplicateCategory(ScenarioCategory::SupplyChain))
        ));
    }

    #[test]
    fn from_entries_rejects_empty_lists() {
        let mut entries = Taxonomy::builtin().entries().to_vec();
        entries[0].keywords.clear();
        assert!(matches!(
            Taxonomy::from_entries(entries),
            Err(TaxonomyError::EmptyKeywords(ScenarioCategory::Phishing))
        ));

        let mut entries = Taxonomy::builtin().entries().to_vec();
        entries[3].concepts.clear();
        assert!(matches!(
            Taxonomy::from_entries(entries),
            Err(TaxonomyError::EmptyConcepts(ScenarioCategory::Database))
        ));
    }

    #[test]
    fn from_entries_rejects_bad_keywords() {
        let mut entries = Taxonomy::builtin().entries().to_vec();
        entries[1].keywords.push("Backup".into());
        assert!(matches!(
            Taxonomy::from_entries(entries),
            Err(TaxonomyError::KeywordNotLowercase { .. })
        ));

        let mut entries = Taxonomy::builtin().entries().to_vec();
        entries[1].keywords.push("backup".into());
        assert!(matches!(
            Taxonomy::from_entries(entries),
            Err(TaxonomyError::DuplicateKeyword { .. })
        ));
    }

    #[test]
    fn load_without_path_is_builtin() {
        assert_eq!(load_taxonomy(None).unwrap(), Taxonomy::builtin());
    }
}
