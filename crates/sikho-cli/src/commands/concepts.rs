//! The `sikho concepts` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};

pub fn execute(data_dir: PathBuf) -> Result<()> {
    let catalog = super::load_catalog(&data_dir)?;

    if catalog.definitions().is_empty() {
        println!("No concepts in {}", data_dir.display());
        return Ok(());
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Concept", "Personas", "Definition"]);

    for def in catalog.definitions() {
        let personas = catalog
            .analogies()
            .iter()
            .find(|a| a.concept_id == def.id)
            .map(|a| a.personas.keys().cloned().collect::<Vec<_>>().join(", "))
            .unwrap_or_else(|| "-".to_string());
        table.add_row(vec![def.id.clone(), personas, def.definition.clone()]);
    }

    println!("{table}");
    println!("{} concept(s)", catalog.definitions().len());

    Ok(())
}
