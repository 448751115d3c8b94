//! satb - check four-part harmony from the command line
//!
//! Subcommands:
//! - `satb check <piece>` - Run harmony rules and print the report
//! - `satb show <piece>` - Print the piece as a small score with functions
//! - `satb export <piece>` - Write the MIDI playback model as JSON
//! - `satb config` - Print the effective configuration

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use satbconf::SatbConfig;

mod commands;

#[derive(Parser)]
#[command(name = "satb")]
#[command(about = "Four-part harmony checker")]
#[command(version)]
struct Cli {
    /// Config file used instead of ./satb.toml
    #[arg(long, global = true, env = "SATB_CONFIG")]
    config: Option<PathBuf>,

    /// Log filter, overrides the configured level (e.g. "debug", "satb=trace")
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run harmony rules on a stored piece (TOML or JSON)
    Check {
        /// Piece record file
        piece: PathBuf,

        /// Comma separated rules: ALL, RANGE, LEAPS, DISTANCES, PARALELS,
        /// CHORDS, CHORDS_IN_CTX
        #[arg(short, long)]
        rules: Option<String>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,

        /// Exit with status 2 when any errors are found
        #[arg(long)]
        strict: bool,
    },

    /// Show a piece with its key and harmonic functions
    Show {
        /// Piece record file
        piece: PathBuf,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Export the MIDI playback model (one track per voice) as JSON
    Export {
        /// Piece record file
        piece: PathBuf,

        /// Tempo in beats per minute
        #[arg(short, long)]
        tempo: Option<u32>,

        /// Output file, relative to the configured output directory
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the effective configuration
    Config {
        /// Also list the files and environment variables that were applied
        #[arg(long)]
        sources: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let (config, sources) = SatbConfig::load_with_sources_from(cli.config.as_deref())
        .context("loading configuration")?;

    let level = cli.log_level.as_deref().unwrap_or(&config.logging.level);
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_new(level)
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(files = ?sources.files, env = ?sources.env_overrides, "configuration loaded");

    match cli.command {
        Commands::Check {
            piece,
            rules,
            json,
            strict,
        } => {
            let has_errors = commands::check(&piece, rules.as_deref(), json, &config)?;
            if strict && has_errors {
                std::process::exit(2);
            }
        }
        Commands::Show { piece, json } => {
            commands::show(&piece, json)?;
        }
        Commands::Export {
            piece,
            tempo,
            output,
        } => {
            commands::export(&piece, tempo, output.as_deref(), &config)?;
        }
        Commands::Config { sources: list } => {
            commands::print_config(&config, list.then_some(&sources));
        }
    }

    Ok(())
}
