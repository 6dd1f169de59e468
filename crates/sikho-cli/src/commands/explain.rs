//! The `sikho explain` command.

use std::path::PathBuf;

use anyhow::Result;

pub fn execute(concept: String, persona: String, dialect: String, data_dir: PathBuf) -> Result<()> {
    let catalog = super::load_catalog(&data_dir)?;

    let Some(explanation) = catalog.explain(&concept, &persona, &dialect) else {
        anyhow::bail!("concept not found: {concept}");
    };

    println!("Definition: {}", explanation.definition);
    println!("Analogy ({persona}): {}", explanation.analogy);
    println!("{dialect}: {}", explanation.dialect_output);

    Ok(())
}
