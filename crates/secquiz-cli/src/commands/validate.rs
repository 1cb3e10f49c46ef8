//! The `secquiz validate` command.

use std::path::PathBuf;

use anyhow::Result;

use secquiz_core::catalog::{load_catalog, validate_catalog};
use secquiz_core::taxonomy::load_taxonomy;

pub fn execute(catalog_path: Option<PathBuf>, taxonomy_path: Option<PathBuf>) -> Result<()> {
    let catalog = load_catalog(catalog_path.as_deref())?;
    let catalog_name = catalog_path
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "built-in".to_string());
    println!("Catalog: {catalog_name} ({} scenarios)", catalog.len());

    let warnings = validate_catalog(&catalog);
    for w in &warnings {
        let prefix = w
            .scenario_id
            .map(|id| format!("  [{id}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    // Taxonomy violations are hard errors and abort here.
    let taxonomy = load_taxonomy(taxonomy_path.as_deref())?;
    let taxonomy_name = taxonomy_path
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "built-in".to_string());
    println!(
        "Taxonomy: {taxonomy_name} ({} categories)",
        taxonomy.entries().len()
    );

    if warnings.is_empty() {
        println!("Catalog and taxonomy valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
