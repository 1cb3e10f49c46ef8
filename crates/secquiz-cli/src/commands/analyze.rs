//! The `secquiz analyze` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use secquiz_core::catalog::load_catalog;
use secquiz_core::engine::{Analysis, Engine};
use secquiz_core::model::{bound_response, MAX_RESPONSE_CHARS};
use secquiz_core::taxonomy::load_taxonomy;

pub fn execute(
    scenario_id: u32,
    response: Option<String>,
    response_file: Option<PathBuf>,
    catalog_path: Option<PathBuf>,
    taxonomy_path: Option<PathBuf>,
    format: String,
) -> Result<()> {
    let catalog = load_catalog(catalog_path.as_deref())?;
    let engine = Engine::new(load_taxonomy(taxonomy_path.as_deref())?);

    let scenario = catalog
        .get(scenario_id)
        .with_context(|| format!("scenario {scenario_id} not found in catalog"))?;

    let response = match (response, response_file) {
        (Some(text), _) => text,
        (None, Some(path)) => std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read response file: {}", path.display()))?,
        (None, None) => anyhow::bail!("either --response or --response-file is required"),
    };

    if response.chars().count() > MAX_RESPONSE_CHARS {
        eprintln!("Response longer than {MAX_RESPONSE_CHARS} characters, truncating.");
    }

    let analysis = engine.analyze_detailed(bound_response(&response), scenario);
    tracing::debug!(
        scenario_id,
        category = %analysis.category,
        word_count = analysis.metrics.word_count,
        score = analysis.result.score,
        "analysis complete"
    );

    match format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&analysis)?),
        _ => print_text(&scenario.title, &analysis),
    }

    Ok(())
}

fn print_text(title: &str, analysis: &Analysis) {
    let result = &analysis.result;

    println!("Scenario: {title} ({})", analysis.category);
    println!("Score: {}/10", result.score);

    let sections = [
        ("Strengths", &result.strengths),
        ("Gaps", &result.gaps),
        ("Suggestions", &result.suggestions),
    ];
    for (heading, items) in sections {
        if items.is_empty() {
            continue;
        }
        println!("\n{heading}:");
        for item in items {
            println!("  - {item}");
        }
    }

    println!("\n{}", result.overall_feedback);
}
