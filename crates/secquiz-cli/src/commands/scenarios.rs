//! The `secquiz scenarios` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use secquiz_core::catalog::load_catalog;
use secquiz_core::classifier::classify;

pub fn execute(catalog_path: Option<PathBuf>) -> Result<()> {
    let catalog = load_catalog(catalog_path.as_deref())?;

    let mut table = Table::new();
    table.set_header(vec!["ID", "Title", "Organization", "Date", "Category"]);

    for scenario in catalog.iter() {
        table.add_row(vec![
            Cell::new(scenario.id.map(|id| id.to_string()).unwrap_or_default()),
            Cell::new(&scenario.title),
            Cell::new(&scenario.organization),
            Cell::new(&scenario.date),
            Cell::new(classify(scenario)),
        ]);
    }

    println!("{table}");
    println!("{} scenario(s)", catalog.len());

    Ok(())
}
