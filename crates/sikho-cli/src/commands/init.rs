//! The `sikho init` command.

use std::path::Path;

use anyhow::{Context, Result};

use sikho_core::dataset::{ANALOGIES_FILE, DEFINITIONS_FILE, DIALECTS_FILE, GAMIFICATION_FILE};

pub fn execute() -> Result<()> {
    write_if_missing(Path::new("sikho.toml"), SAMPLE_CONFIG)?;

    std::fs::create_dir_all("data").context("failed to create data directory")?;
    let data = Path::new("data");
    for (name, content) in [
        (DEFINITIONS_FILE, SAMPLE_DEFINITIONS),
        (ANALOGIES_FILE, SAMPLE_ANALOGIES),
        (DIALECTS_FILE, SAMPLE_DIALECTS),
        (GAMIFICATION_FILE, SAMPLE_GAMIFICATION),
    ] {
        write_if_missing(&data.join(name), content)?;
    }

    println!("\nNext steps:");
    println!("  1. Edit the files in data/ with your own concepts");
    println!("  2. Run: sikho validate --data-dir data");
    println!("  3. Run: sikho serve");

    Ok(())
}

fn write_if_missing(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        println!("{} already exists, skipping.", path.display());
    } else {
        std::fs::write(path, content)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("Created {}", path.display());
    }
    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# sikho configuration

host = "127.0.0.1"
port = 5000
data_dir = "data"
default_persona = "farmer"
default_dialect = "bhojpuri"
"#;

const SAMPLE_DEFINITIONS: &str = r#"[
  {
    "id": "plants",
    "topic": "Plants Around Us",
    "subject": "EVS",
    "definition": "Plants are living things that make their own food using sunlight, water and air.",
    "definition_simplified": "Plants make their own food from sunlight, water and air."
  },
  {
    "id": "water",
    "topic": "Water",
    "subject": "EVS",
    "definition": "Water is a liquid that all living things need to stay alive.",
    "definition_simplified": "Every living thing needs water."
  },
  {
    "id": "counting",
    "topic": "Counting",
    "subject": "Maths",
    "definition": "Counting is saying numbers in order to find how many things there are.",
    "definition_simplified": "Counting tells us how many."
  }
]
"#;

const SAMPLE_ANALOGIES: &str = r#"[
  {
    "concept_id": "plants",
    "analogy_farmer": "Just like your wheat grows when the field gets sun and water from the canal.",
    "analogy_homemaker": "Like the tulsi in the courtyard that stays green when you water it every morning."
  },
  {
    "concept_id": "water",
    "analogy_farmer": "Like the crops that dry up when the monsoon is late.",
    "analogy_homemaker": "Like dough that cannot be made without adding water."
  },
  {
    "concept_id": "counting",
    "analogy_farmer": "Like counting the goats as they come back in the evening.",
    "analogy_homemaker": "Like counting rotis so everyone at home gets enough."
  }
]
"#;

const SAMPLE_DIALECTS: &str = r#"{
  "templates": {
    "bhojpuri": {
      "simple_pattern": "{definition_simplified} Samjha, jaise {analogy}"
    },
    "hindi": {
      "simple_pattern": "{definition_simplified} Yaani, {analogy}"
    },
    "english": {
      "simple_pattern": "{definition_simplified}. For example: {analogy}"
    }
  }
}
"#;

const SAMPLE_GAMIFICATION: &str = r#"{
  "levels": [
    { "level": 1, "xp_required": 0, "title": "Dry Field" },
    { "level": 2, "xp_required": 50, "title": "Sprouting" },
    { "level": 3, "xp_required": 150, "title": "Growing" },
    { "level": 4, "xp_required": 300, "title": "Ready to Harvest" }
  ],
  "badges": [
    { "id": "first_answer", "name": "First Seed" }
  ]
}
"#;
