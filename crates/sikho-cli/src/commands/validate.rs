//! The `sikho validate` command.

use std::path::PathBuf;

use anyhow::Result;

use sikho_core::validate_catalog;

pub fn execute(data_dir: PathBuf) -> Result<()> {
    let catalog = super::load_catalog(&data_dir)?;

    println!(
        "Datasets: {} concepts, {} analogy records, {} dialects, {} levels",
        catalog.definitions().len(),
        catalog.analogies().len(),
        catalog.dialects().templates.len(),
        catalog.gamification().levels.len()
    );

    let warnings = validate_catalog(&catalog);
    for w in &warnings {
        let prefix = w
            .subject
            .as_ref()
            .map(|s| format!("  [{s}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("All datasets valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
