//! Error types for the scoring engine.
//!
//! None of these reach a learner: request errors are turned into the
//! fallback result at the boundary, taxonomy errors stop a bad taxonomy file
//! from being loaded at startup.

use thiserror::Error;

use crate::model::ScenarioCategory;

/// Errors raised while decoding an analyze request.
#[derive(Debug, Error)]
pub enum RequestError {
    /// The body is not valid JSON.
    #[error("malformed JSON body: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// A required field is absent or null.
    #[error("missing field: {0}")]
    MissingField(&'static str),

    /// A field is present but has the wrong JSON type.
    #[error("field {field} must be a {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },
}

/// Violations of the taxonomy invariant found while loading a taxonomy.
#[derive(Debug, Error)]
pub enum TaxonomyError {
    /// A category has no entry.
    #[error("category {0} is missing from the taxonomy")]
    MissingCategory(ScenarioCategory),

    /// Two entries resolve to the same category (e.g. `supplyChain` and `supply-chain`).
    #[error("category {0} is defined more than once")]
    DuplicateCategory(ScenarioCategory),

    /// A table name does not match any category.
    #[error("unknown category: {0}")]
    UnknownCategory(String),

    /// A category has no keywords.
    #[error("category {0} has no keywords")]
    EmptyKeywords(ScenarioCategory),

    /// A category has no concepts.
    #[error("category {0} has no concepts")]
    EmptyConcepts(ScenarioCategory),

    /// Keywords are matched against lower-cased text and must be lowercase.
    #[error("keyword {keyword:?} in category {category} is not lowercase")]
    KeywordNotLowercase {
        category: ScenarioCategory,
        keyword: String,
    },

    /// A keyword appears twice in the same category.
    #[error("keyword {keyword:?} appears more than once in category {category}")]
    DuplicateKeyword {
        category: ScenarioCategory,
        keyword: String,
    },
}
