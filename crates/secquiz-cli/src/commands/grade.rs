//! The `secquiz grade` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use secquiz_core::catalog::load_catalog;
use secquiz_core::engine::Engine;
use secquiz_core::grading::{grade_submissions, parse_submissions};
use secquiz_core::report::GradingReport;
use secquiz_core::taxonomy::load_taxonomy;

pub fn execute(
    submissions_path: PathBuf,
    catalog_path: Option<PathBuf>,
    taxonomy_path: Option<PathBuf>,
    output: PathBuf,
    format: String,
) -> Result<()> {
    let submissions = parse_submissions(&submissions_path)?;
    let catalog = load_catalog(catalog_path.as_deref())?;
    let engine = Engine::new(load_taxonomy(taxonomy_path.as_deref())?);

    eprintln!(
        "secquiz v{} - Grading {} submission(s) against {} scenario(s)",
        env!("CARGO_PKG_VERSION"),
        submissions.len(),
        catalog.len()
    );

    let source = submissions_path.display().to_string();
    let report = grade_submissions(&engine, &catalog, &submissions, &source);

    print_summary(&report);

    std::fs::create_dir_all(&output)?;
    let timestamp = report.created_at.format("%Y-%m-%dT%H%M%S");

    let formats: Vec<&str> = if format == "all" {
        vec!["json", "markdown"]
    } else {
        format.split(',').collect()
    };

    for fmt in &formats {
        match *fmt {
            "json" => {
                let path = output.join(format!("grading-{timestamp}.json"));
                report.save_json(&path)?;
                eprintln!("Results saved to: {}", path.display());
            }
            "markdown" | "md" => {
                let path = output.join(format!("grading-{timestamp}.md"));
                std::fs::write(&path, report.to_markdown())?;
                eprintln!("Markdown report: {}", path.display());
            }
            _ => {
                eprintln!("Unknown format: {fmt}");
            }
        }
    }

    Ok(())
}

fn print_summary(report: &GradingReport) {
    let mut table = Table::new();
    table.set_header(vec![
        "Submission",
        "Scenario",
        "Category",
        "Score",
        "Concepts",
    ]);

    for s in &report.submissions {
        let covered = s.metrics.covered_concepts.len();
        let total = covered + s.metrics.missed_concepts.len();
        table.add_row(vec![
            Cell::new(&s.submission_id),
            Cell::new(&s.scenario_title),
            Cell::new(s.category),
            Cell::new(s.result.score),
            Cell::new(format!("{covered}/{total}")),
        ]);
    }

    eprintln!("\n{table}");

    let stats = &report.aggregate;
    eprintln!(
        "Mean score: {:.1} | Median: {:.1} | Low quality: {} | Developing: {} | Good: {} | Excellent: {}",
        stats.mean_score,
        stats.median_score,
        stats.tiers.low_quality,
        stats.tiers.developing,
        stats.tiers.good,
        stats.tiers.excellent
    );
    if report.skipped > 0 {
        eprintln!("{} submission(s) skipped (unknown scenario)", report.skipped);
    }
    if report.duplicates > 0 {
        eprintln!("{} submission(s) skipped (duplicate id)", report.duplicates);
    }
}
