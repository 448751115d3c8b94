//! Subcommand implementations.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use satb::{Piece, PieceRecord, Report, RuleSet, ScoreView};
use satbconf::{ConfigSources, SatbConfig};
use serde::Serialize;
use tracing::info;

/// Read a stored piece. `.json` files are JSON, anything else is TOML.
pub fn load_record(path: &Path) -> Result<PieceRecord> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;

    let record = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => serde_json::from_str(&text)
            .with_context(|| format!("parsing {} as JSON", path.display()))?,
        _ => toml::from_str(&text)
            .with_context(|| format!("parsing {} as TOML", path.display()))?,
    };
    Ok(record)
}

fn load_piece(path: &Path) -> Result<Piece> {
    let record = load_record(path)?;
    Piece::from_record(&record).with_context(|| format!("analyzing {}", path.display()))
}

fn rule_set(rules: Option<&str>, config: &SatbConfig) -> Result<RuleSet> {
    let set = match rules {
        Some(names) => names.parse::<RuleSet>()?,
        None => RuleSet::parse(&config.rules.enabled).context("rules.enabled in configuration")?,
    };
    Ok(set)
}

#[derive(Serialize)]
struct CheckOutput<'a> {
    piece: ScoreView,
    rules: String,
    report: &'a Report,
}

/// Check a piece and print the report. Returns whether errors were found.
pub fn check(path: &Path, rules: Option<&str>, json: bool, config: &SatbConfig) -> Result<bool> {
    let rules = rule_set(rules, config)?;
    let piece = load_piece(path)?;
    let report = piece.check(&rules);

    if json {
        let output = CheckOutput {
            piece: ScoreView::of(&piece),
            rules: rules.to_string(),
            report: &report,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", ScoreView::of(&piece));
        print!("{}", report);
    }

    Ok(report.has_errors())
}

pub fn show(path: &Path, json: bool) -> Result<()> {
    let view = ScoreView::of(&load_piece(path)?);
    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print!("{}", view);
    }
    Ok(())
}

pub fn export(
    path: &Path,
    tempo: Option<u32>,
    output: Option<&Path>,
    config: &SatbConfig,
) -> Result<()> {
    let tempo = tempo.unwrap_or(config.export.tempo_bpm);
    if tempo == 0 {
        bail!("tempo must be at least 1 BPM");
    }

    let export = load_piece(path)?.midi_export(tempo);
    let json = serde_json::to_string_pretty(&export)?;

    match output {
        Some(output) => {
            let target = config.export.output_dir.join(output);
            fs::write(&target, json + "\n")
                .with_context(|| format!("writing {}", target.display()))?;
            info!(path = %target.display(), tracks = export.tracks.len(), "export written");
        }
        None => println!("{}", json),
    }
    Ok(())
}

pub fn print_config(config: &SatbConfig, sources: Option<&ConfigSources>) {
    print!("{}", config.to_toml());

    if let Some(sources) = sources {
        println!();
        println!("# Loaded from:");
        for file in &sources.files {
            println!("#   {}", file.display());
        }
        for var in &sources.env_overrides {
            println!("#   ${}", var);
        }
    }
}
