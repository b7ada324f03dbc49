//! ring-inspect CLI: classify ring parts in one or more images.

use clap::Parser;
use log::LevelFilter;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use ring_inspect::batch::{inspect_batch, BatchEntry, BatchTally};
use ring_inspect::core::ContourApproximation;
use ring_inspect::detect::DetectError;
use ring_inspect::{InspectParams, InspectionReport};

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error("failed to read config {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {}: {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Detect(#[from] DetectError),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("{failed} of {total} images could not be inspected")]
    Failures { failed: usize, total: usize },
}

#[derive(Parser, Debug)]
#[command(name = "ring-inspect")]
#[command(about = "Classify the outer profile of ring-shaped parts as good, cut, flash or mixed")]
#[command(version)]
struct Cli {
    /// Input images, processed in order.
    #[arg(value_name = "IMAGE", required = true)]
    images: Vec<PathBuf>,

    /// JSON file with inspection parameters; missing keys keep their defaults.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Binarization cut point; darker pixels are the part.
    #[arg(long)]
    cut_point: Option<u8>,

    /// Defect threshold as a fraction of the fitted radius.
    #[arg(long)]
    threshold_factor: Option<f64>,

    /// Keep every border pixel instead of only direction changes.
    #[arg(long)]
    no_approx: bool,

    /// Write annotated overlays into this directory.
    #[arg(long, value_name = "DIR")]
    out_dir: Option<PathBuf>,

    /// Print a JSON array instead of one summary line per image.
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn params(&self) -> Result<InspectParams, CliError> {
        let mut params = match &self.config {
            Some(path) => load_config(path)?,
            None => InspectParams::default(),
        };
        if let Some(cut_point) = self.cut_point {
            params = params.with_cut_point(cut_point);
        }
        if let Some(factor) = self.threshold_factor {
            params = params.with_threshold_factor(factor);
        }
        if self.no_approx {
            params = params.with_approximation(ContourApproximation::None);
        }
        Ok(params)
    }

    fn level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        }
    }
}

fn load_config(path: &Path) -> Result<InspectParams, CliError> {
    let text = std::fs::read_to_string(path).map_err(|source| CliError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| CliError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })
}

#[derive(Serialize)]
struct JsonEntry<'a> {
    path: &'a Path,
    #[serde(skip_serializing_if = "Option::is_none")]
    report: Option<&'a InspectionReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    output: Option<&'a Path>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<'a> From<&'a BatchEntry> for JsonEntry<'a> {
    fn from(entry: &'a BatchEntry) -> Self {
        Self {
            path: &entry.path,
            report: entry.outcome.as_ref().ok(),
            output: entry.output.as_deref(),
            error: entry.outcome.as_ref().err().map(ToString::to_string),
        }
    }
}

#[cfg(feature = "tracing")]
fn init_logging(level: LevelFilter) {
    ring_inspect::core::init_tracing(ring_inspect::core::TracingFormat::Text, level);
    let _ = tracing_log::LogTracer::init();
}

#[cfg(not(feature = "tracing"))]
fn init_logging(level: LevelFilter) {
    let _ = ring_inspect::core::init_with_level(level);
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let params = cli.params()?;
    let entries = inspect_batch(&cli.images, params, cli.out_dir.as_deref())?;

    if cli.json {
        let rows: Vec<JsonEntry<'_>> = entries.iter().map(JsonEntry::from).collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        for entry in &entries {
            match &entry.outcome {
                Ok(report) => println!("{}: {}", entry.path.display(), report.result),
                Err(err) => println!("{}: error: {err}", entry.path.display()),
            }
        }
    }

    let tally = BatchTally::from_entries(&entries);
    if tally.failed > 0 {
        return Err(CliError::Failures {
            failed: tally.failed,
            total: tally.total(),
        });
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.level());
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
