//! End-to-end tests for the `satb` binary.
//!
//! Every test runs in its own temp directory so no ./satb.toml leaks in,
//! with the config-related environment cleared.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const CADENCE: &str = r#"
title = "Cadence"
soprano = "G' A' G' G'"
alto = "E' F' D' E'"
tenor = "C' C' B, C'"
bass = "C, F, G, C,"
"#;

const TOO_HIGH: &str = r#"
title = "Too high"
soprano = "G' C'''"
alto = "E' E'"
tenor = "C' C'"
bass = "C, C,"
"#;

fn satb(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("satb").unwrap();
    cmd.current_dir(dir)
        .env_remove("RUST_LOG")
        .env_remove("SATB_RULES")
        .env_remove("SATB_LOG_LEVEL")
        .env_remove("SATB_TEMPO_BPM")
        .env_remove("SATB_OUTPUT_DIR")
        .env_remove("SATB_CONFIG");
    cmd
}

fn write(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn check_reports_range_error() {
    let dir = TempDir::new().unwrap();
    let piece = write(&dir, "high.toml", TOO_HIGH);

    satb(dir.path())
        .args(["check", "--rules", "RANGE"])
        .arg(&piece)
        .assert()
        .success()
        .stdout(predicate::str::contains("Voice range errors (1):"))
        .stdout(predicate::str::contains("Chord 2: S too high"));
}

#[test]
fn check_strict_fails_on_errors() {
    let dir = TempDir::new().unwrap();
    let piece = write(&dir, "high.toml", TOO_HIGH);

    satb(dir.path())
        .args(["check", "--strict", "--rules", "range"])
        .arg(&piece)
        .assert()
        .code(2);
}

#[test]
fn check_clean_cadence_with_all_rules() {
    let dir = TempDir::new().unwrap();
    let piece = write(&dir, "cadence.toml", CADENCE);

    satb(dir.path())
        .args(["check", "--strict"])
        .arg(&piece)
        .assert()
        .success()
        .stdout(predicate::str::contains("Cadence (C major)"))
        .stdout(predicate::str::contains("Errors (0):"))
        .stdout(predicate::str::contains("Checking chords in context"));
}

#[test]
fn check_json_output() {
    let dir = TempDir::new().unwrap();
    let piece = write(&dir, "high.toml", TOO_HIGH);

    let output = satb(dir.path())
        .args(["check", "--json", "--rules", "RANGE,LEAPS"])
        .arg(&piece)
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["rules"], "RANGE,LEAPS");
    assert_eq!(value["report"]["error_count"], 2);
    assert_eq!(value["piece"]["key"], "C major");
}

#[test]
fn check_reads_json_records() {
    let dir = TempDir::new().unwrap();
    let piece = write(
        &dir,
        "piece.json",
        r#"{"title": "J", "soprano": "G'", "alto": "E'", "tenor": "C'", "bass": "C,", "is_public": true}"#,
    );

    satb(dir.path())
        .args(["check", "--rules", "CHORDS"])
        .arg(&piece)
        .assert()
        .success()
        .stdout(predicate::str::contains("Errors (0):"));
}

#[test]
fn check_rejects_unknown_rule() {
    let dir = TempDir::new().unwrap();
    let piece = write(&dir, "cadence.toml", CADENCE);

    satb(dir.path())
        .args(["check", "--rules", "MELODY"])
        .arg(&piece)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown rule"));
}

#[test]
fn check_uses_rules_from_config() {
    let dir = TempDir::new().unwrap();
    let piece = write(&dir, "high.toml", TOO_HIGH);
    write(&dir, "satb.toml", "[rules]\nenabled = [\"LEAPS\"]\n");

    satb(dir.path())
        .arg("check")
        .arg(&piece)
        .assert()
        .success()
        .stdout(predicate::str::contains("Restricted leaps"))
        .stdout(predicate::str::contains("Voice range errors").not());
}

#[test]
fn check_reports_bad_notes() {
    let dir = TempDir::new().unwrap();
    let piece = write(
        &dir,
        "bad.toml",
        "title = \"Bad\"\nsoprano = \"G' A'\"\nalto = \"E' F'\"\ntenor = \"C' C'\"\nbass = \"C, H,\"\n",
    );

    satb(dir.path())
        .arg("check")
        .arg(&piece)
        .assert()
        .failure()
        .stderr(predicate::str::contains("B: use English note names"));
}

#[test]
fn show_prints_score() {
    let dir = TempDir::new().unwrap();
    let piece = write(&dir, "cadence.toml", CADENCE);

    satb(dir.path())
        .arg("show")
        .arg(&piece)
        .assert()
        .success()
        .stdout(predicate::str::contains("S: |G4  A4  G4  G4 ||"))
        .stdout(predicate::str::contains("F: |T   S   D   T  ||"));
}

#[test]
fn export_writes_tracks() {
    let dir = TempDir::new().unwrap();
    let piece = write(&dir, "cadence.toml", CADENCE);

    satb(dir.path())
        .args(["export", "--tempo", "60", "--output", "cadence.json"])
        .arg(&piece)
        .assert()
        .success();

    let text = fs::read_to_string(dir.path().join("cadence.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["tempo_bpm"], 60);
    assert_eq!(value["tracks"].as_array().unwrap().len(), 4);
    assert_eq!(value["tracks"][3]["notes"], serde_json::json!([48, 53, 55, 48]));
}

#[test]
fn export_defaults_to_configured_tempo() {
    let dir = TempDir::new().unwrap();
    let piece = write(&dir, "cadence.toml", CADENCE);

    satb(dir.path())
        .arg("export")
        .arg(&piece)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"tempo_bpm\": 90"));
}

#[test]
fn config_prints_effective_values() {
    let dir = TempDir::new().unwrap();
    let custom = write(&dir, "custom.toml", "[export]\ntempo_bpm = 72\n");

    satb(dir.path())
        .args(["config", "--sources", "--config"])
        .arg(&custom)
        .env("SATB_LOG_LEVEL", "warn")
        .assert()
        .success()
        .stdout(predicate::str::contains("tempo_bpm = 72"))
        .stdout(predicate::str::contains("level = \"warn\""))
        .stdout(predicate::str::contains("$SATB_LOG_LEVEL"));
}

#[test]
fn missing_config_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    write(&dir, "satb.toml", "[export]\ntempo_bpm = 33\n");

    satb(dir.path())
        .args(["config", "--config", "does_not_exist.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does_not_exist.toml"))
        .stdout(predicate::str::contains("tempo_bpm = 33").not());
}
