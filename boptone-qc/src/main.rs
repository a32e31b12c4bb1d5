//! boptone-qc - command-line front end for the audio quality-control engine
//!
//! Prints JSON reports on stdout; logs go to stderr.
//!
//! Exit codes: 0 when every input passed its gate, 2 otherwise.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use boptone_common::logging::init_tracing;
use boptone_qc::{
    AudioGate, AudioValidator, DistributionGate, LegacyPrecheck, QcConfigFile, ValidationOptions,
};
use clap::{Parser, Subcommand};
use futures::stream::{self, StreamExt};
use serde::Serialize;
use tracing::{debug, info};

/// Command-line arguments for boptone-qc
#[derive(Parser, Debug)]
#[command(name = "boptone-qc")]
#[command(about = "Audio upload quality control for Boptone")]
#[command(version)]
struct Args {
    /// Configuration file (overrides BOPTONE_QC_CONFIG and the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level or filter directive (overrides the configuration file)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate audio files for distribution and report their quality tier
    Audio {
        /// Audio files to validate
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Skip the external loudness measurement
        #[arg(long)]
        skip_loudness: bool,

        /// Reject mono audio instead of warning
        #[arg(long)]
        disallow_mono: bool,

        /// Minimum lossy bitrate in kbps
        #[arg(long)]
        min_mp3_bitrate: Option<u32>,

        /// Maximum number of files validated at once
        #[arg(short, long, default_value_t = 4)]
        jobs: usize,
    },

    /// Validate a cover-art image
    CoverArt {
        file: PathBuf,
    },

    /// Run the coarse legacy pre-check on one audio file
    Precheck {
        file: PathBuf,

        /// Size ceiling in megabytes
        #[arg(long, default_value_t = 500)]
        max_size_mb: u64,
    },
}

/// One file's report in the `audio` output
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FileReport<T: Serialize> {
    file: String,
    #[serde(flatten)]
    report: T,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config =
        QcConfigFile::load(args.config.as_deref()).context("Failed to load configuration")?;
    let mut logging = config.logging.clone();
    if let Some(level) = args.log_level {
        logging.level = level;
    }
    init_tracing(&logging).context("Failed to initialise logging")?;
    debug!(
        loudness_tool = %config.validation.loudness.tool_path.display(),
        "Configuration loaded"
    );

    let validator = Arc::new(AudioValidator::new(config.validation));

    let all_passed = match args.command {
        Command::Audio {
            files,
            skip_loudness,
            disallow_mono,
            min_mp3_bitrate,
            jobs,
        } => {
            let defaults = ValidationOptions::default();
            let options = ValidationOptions {
                skip_loudness,
                allow_mono: !disallow_mono,
                min_mp3_bitrate_kbps: min_mp3_bitrate.unwrap_or(defaults.min_mp3_bitrate_kbps),
            };
            let gate = DistributionGate::new(validator, options);
            run_audio(&gate, files, jobs.max(1)).await?
        }
        Command::CoverArt { file } => {
            let buffer = read_file(&file).await?;
            let result = validator.validate_cover_art(&buffer, &display_name(&file));
            print_json(&result)?;
            result.is_valid
        }
        Command::Precheck { file, max_size_mb } => {
            let gate = LegacyPrecheck::new(validator, max_size_mb);
            let buffer = read_file(&file).await?;
            let verdict = gate.check(&buffer, &display_name(&file)).await;
            print_json(&verdict)?;
            LegacyPrecheck::accepts(&verdict)
        }
    };

    if !all_passed {
        std::process::exit(2);
    }
    Ok(())
}

/// Validate every file with at most `jobs` in flight; output keeps input order
async fn run_audio<G>(gate: &G, files: Vec<PathBuf>, jobs: usize) -> Result<bool>
where
    G: AudioGate,
    G::Verdict: Serialize,
{
    info!(files = files.len(), jobs, gate = gate.name(), "Validating audio files");

    let mut reports = stream::iter(files.into_iter().enumerate())
        .map(|(index, path)| async move {
            let buffer = read_file(&path).await?;
            let name = display_name(&path);
            let verdict = gate.check(&buffer, &name).await;
            let passed = G::accepts(&verdict);
            Ok::<_, anyhow::Error>((
                index,
                FileReport {
                    file: path.display().to_string(),
                    report: verdict,
                },
                passed,
            ))
        })
        .buffer_unordered(jobs)
        .collect::<Vec<_>>()
        .await
        .into_iter()
        .collect::<Result<Vec<(usize, FileReport<G::Verdict>, bool)>>>()?;

    reports.sort_by_key(|(index, _, _)| *index);
    let all_passed = reports.iter().all(|(_, _, passed)| *passed);
    let reports: Vec<_> = reports.into_iter().map(|(_, report, _)| report).collect();
    print_json(&reports)?;
    Ok(all_passed)
}

async fn read_file(path: &Path) -> Result<Vec<u8>> {
    tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))
}

/// File name used for format detection
fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialise report")?;
    println!("{}", json);
    Ok(())
}
