//! Fixture-based tests for whole-piece checks.
//!
//! Each .toml file in tests/fixtures/ is a stored piece record plus an
//! `[expect]` table. The piece is checked against every rule.

use satb::{render, Piece, PieceRecord, RuleSet};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct Fixture {
    #[serde(flatten)]
    record: PieceRecord,
    expect: Expect,
}

#[derive(Debug, Deserialize)]
struct Expect {
    key: String,
    functions: String,
    errors: usize,
    warnings: usize,
    #[serde(default)]
    details: Vec<String>,
}

fn test_fixture(name: &str) {
    let fixture_path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(format!("{}.toml", name));

    let content = fs::read_to_string(&fixture_path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", name, e));
    let fixture: Fixture = toml::from_str(&content)
        .unwrap_or_else(|e| panic!("Fixture {} is not valid: {}", name, e));

    let piece = Piece::from_record(&fixture.record)
        .unwrap_or_else(|e| panic!("Fixture {} did not build: {}", name, e));
    let report = piece.check(&RuleSet::all());

    assert_eq!(piece.key().to_string(), fixture.expect.key, "key of {}", name);
    assert_eq!(
        render::functions_row(&piece.functions()),
        fixture.expect.functions,
        "functions of {}",
        name
    );
    assert_eq!(
        report.error_count(),
        fixture.expect.errors,
        "errors in {}:\n{}",
        name,
        report
    );
    assert_eq!(
        report.warning_count(),
        fixture.expect.warnings,
        "warnings in {}:\n{}",
        name,
        report
    );

    for detail in &fixture.expect.details {
        assert!(
            report.findings().any(|f| f.details.contains(detail)),
            "Fixture {} is missing {:?}:\n{}",
            name,
            detail,
            report
        );
    }

    // a second run must not see the first one's findings
    assert_eq!(piece.check(&RuleSet::all()), report);
}

#[test]
fn test_fixture_cadence() {
    test_fixture("cadence");
}

#[test]
fn test_fixture_minor_chorale() {
    test_fixture("minor_chorale");
}

#[test]
fn test_fixture_parallel_octaves() {
    test_fixture("parallel_octaves");
}

#[test]
fn test_fixture_soprano_too_high() {
    test_fixture("soprano_too_high");
}
