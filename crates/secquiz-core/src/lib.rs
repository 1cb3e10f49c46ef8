//! Scoring engine, taxonomy and scenario catalog for secquiz.
//!
//! This crate defines the data model and the keyword/concept scoring logic
//! that the server and CLI build on.

pub mod catalog;
pub mod classifier;
pub mod engine;
pub mod error;
pub mod evaluator;
pub mod formatter;
pub mod grading;
pub mod model;
pub mod report;
pub mod statistics;
pub mod taxonomy;
