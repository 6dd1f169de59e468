//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;

fn sikho() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("sikho").unwrap()
}

/// A temp dir with `sikho init` already run in it.
fn initialized() -> TempDir {
    let dir = TempDir::new().unwrap();
    sikho().current_dir(dir.path()).arg("init").assert().success();
    dir
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    sikho()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created sikho.toml"))
        .stdout(predicate::str::contains("class1_definitions.json"));

    assert!(dir.path().join("sikho.toml").exists());
    for name in [
        "class1_definitions.json",
        "class1_analogies.json",
        "dialect_templates.json",
        "gamification.json",
    ] {
        assert!(dir.path().join("data").join(name).exists(), "{name}");
    }
}

#[test]
fn init_skips_existing() {
    let dir = initialized();

    sikho()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn validate_sample_datasets() {
    let dir = initialized();

    sikho()
        .current_dir(dir.path())
        .args(["validate", "--data-dir", "data"])
        .assert()
        .success()
        .stdout(predicate::str::contains("3 concepts"))
        .stdout(predicate::str::contains("All datasets valid"));
}

#[test]
fn validate_reports_warnings() {
    let dir = initialized();
    let data = dir.path().join("data");
    std::fs::write(
        data.join("class1_analogies.json"),
        json!([{"concept_id": "plants", "analogy_farmer": "A field."}]).to_string(),
    )
    .unwrap();

    sikho()
        .args(["validate", "--data-dir"])
        .arg(&data)
        .assert()
        .success()
        .stdout(predicate::str::contains("[water] WARNING: concept has no analogies"))
        .stdout(predicate::str::contains("warning(s) found"));
}

#[test]
fn validate_missing_directory() {
    sikho()
        .args(["validate", "--data-dir", "does-not-exist"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"))
        .stderr(predicate::str::contains("class1_definitions.json"));
}

#[test]
fn malformed_dataset_fails() {
    let dir = initialized();
    let data = dir.path().join("data");
    std::fs::write(data.join("gamification.json"), "{\"levels\": [").unwrap();

    sikho()
        .args(["validate", "--data-dir"])
        .arg(&data)
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse dataset"));
}

#[test]
fn concepts_lists_ids_and_personas() {
    let dir = initialized();

    sikho()
        .current_dir(dir.path())
        .args(["concepts", "--data-dir", "data"])
        .assert()
        .success()
        .stdout(predicate::str::contains("plants"))
        .stdout(predicate::str::contains("farmer, homemaker"))
        .stdout(predicate::str::contains("3 concept(s)"));
}

#[test]
fn explain_prints_dialect_output() {
    let dir = initialized();

    sikho()
        .current_dir(dir.path())
        .args(["explain", "water", "--dialect", "english", "--data-dir", "data"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "english: Water is a liquid that all living things need to stay alive.. For example: Like the crops that dry up when the monsoon is late.",
        ));
}

#[test]
fn explain_missing_persona_falls_back() {
    let dir = initialized();

    sikho()
        .current_dir(dir.path())
        .args(["explain", "plants", "--persona", "trader", "--data-dir", "data"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Analogy (trader): No example available."));
}

#[test]
fn explain_unknown_concept() {
    let dir = initialized();

    sikho()
        .current_dir(dir.path())
        .args(["explain", "gravity", "--data-dir", "data"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("concept not found: gravity"));
}

#[test]
fn level_uses_default_gain() {
    let dir = initialized();

    sikho()
        .current_dir(dir.path())
        .args(["level", "--current-xp", "40", "--data-dir", "data"])
        .assert()
        .success()
        .stdout(predicate::str::contains("XP: 40 + 10 = 50"))
        .stdout(predicate::str::contains("Level: 2"));
}

#[test]
fn level_accepts_negative_xp() {
    let dir = initialized();

    sikho()
        .current_dir(dir.path())
        .args(["level", "--current-xp", "-20", "--add", "5", "--data-dir", "data"])
        .assert()
        .success()
        .stdout(predicate::str::contains("= -15"))
        .stdout(predicate::str::contains("Level: 1"));
}

#[test]
fn level_accepts_fractional_xp() {
    let dir = initialized();

    sikho()
        .current_dir(dir.path())
        .args(["level", "--current-xp", "45.5", "--data-dir", "data"])
        .assert()
        .success()
        .stdout(predicate::str::contains("XP: 45.5 + 10 = 55.5"))
        .stdout(predicate::str::contains("Level: 2"));
}

#[test]
fn level_rejects_non_numeric_xp() {
    sikho()
        .args(["level", "--current-xp", "lots"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid XP amount"));
}

#[test]
fn validate_flags_non_string_persona_analogy() {
    let dir = initialized();
    let data = dir.path().join("data");
    std::fs::write(
        data.join("class1_analogies.json"),
        json!([
            {"concept_id": "plants", "analogy_farmer": 3},
            {"concept_id": "water", "analogy_farmer": "Rain."},
            {"concept_id": "counting", "analogy_farmer": "Goats."}
        ])
        .to_string(),
    )
    .unwrap();

    sikho()
        .args(["validate", "--data-dir"])
        .arg(&data)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "[plants] WARNING: analogy_farmer is not a usable persona analogy, got 3",
        ));
}

#[test]
fn serve_refuses_to_start_without_datasets() {
    let dir = TempDir::new().unwrap();

    sikho()
        .current_dir(dir.path())
        .env_remove("SIKHO_DATA_DIR")
        .args(["serve", "--data-dir", "missing", "--port", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load datasets"));
}

#[test]
fn serve_rejects_missing_config() {
    sikho()
        .args(["serve", "--config", "nonexistent.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("config file not found"));
}
