//! Continue-on-error inspection of many image files.
//!
//! Each input is loaded, inspected and, when an output directory is given,
//! rendered to `<index>_<stem>_<label>.png`. A failing image is logged and
//! recorded in its entry; the remaining inputs are still processed.

use log::{info, warn};
use std::path::{Path, PathBuf};

use crate::detect::{inspect_image, load_gray, DetectError};
use crate::inspector::{Classification, InspectParams, InspectionReport, RingInspector};
use crate::render::save_annotated;

/// Outcome for one input path.
#[derive(Debug)]
pub struct BatchEntry {
    /// Position of the input in the batch, starting at 0.
    pub index: usize,
    pub path: PathBuf,
    pub outcome: Result<InspectionReport, DetectError>,
    /// Annotated image written for this input, if any.
    pub output: Option<PathBuf>,
}

impl BatchEntry {
    #[inline]
    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Per-class counts over a finished batch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct BatchTally {
    pub good: usize,
    pub cut: usize,
    pub flash: usize,
    pub mixed: usize,
    pub failed: usize,
}

impl BatchTally {
    pub fn from_entries(entries: &[BatchEntry]) -> Self {
        let mut tally = Self::default();
        for entry in entries {
            match &entry.outcome {
                Ok(report) => match report.classification() {
                    Classification::Good => tally.good += 1,
                    Classification::Cut => tally.cut += 1,
                    Classification::Flash => tally.flash += 1,
                    Classification::Mixed => tally.mixed += 1,
                },
                Err(_) => tally.failed += 1,
            }
        }
        tally
    }

    #[inline]
    pub fn total(&self) -> usize {
        self.good + self.cut + self.flash + self.mixed + self.failed
    }
}

/// Annotated output name for input number `index`.
///
/// The index keeps names unique when several inputs share a stem or a
/// classification.
pub fn output_file_name(index: usize, path: &Path, classification: Classification) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    format!("{index:02}_{stem}_{}.png", classification.as_str())
}

fn inspect_one(
    index: usize,
    path: &Path,
    params: InspectParams,
    out_dir: Option<&Path>,
) -> Result<(InspectionReport, Option<PathBuf>), DetectError> {
    let raster = load_gray(path)?;
    let report = inspect_image(&raster, params)?;
    let Some(dir) = out_dir else {
        return Ok((report, None));
    };
    let target = dir.join(output_file_name(index, path, report.classification()));
    save_annotated(&raster, &report, &target)?;
    Ok((report, Some(target)))
}

/// Inspect every path in order.
///
/// Parameters are validated once up front and `out_dir` is created if
/// missing; both failures abort the batch. Per-image failures do not.
pub fn inspect_batch<P: AsRef<Path>>(
    paths: &[P],
    params: InspectParams,
    out_dir: Option<&Path>,
) -> Result<Vec<BatchEntry>, DetectError> {
    RingInspector::new(params)?;
    if let Some(dir) = out_dir {
        std::fs::create_dir_all(dir)?;
    }

    let mut entries = Vec::with_capacity(paths.len());
    for (index, path) in paths.iter().enumerate() {
        let path = path.as_ref();
        let (outcome, output) = match inspect_one(index, path, params, out_dir) {
            Ok((report, output)) => {
                info!("{}: {}", path.display(), report.result);
                (Ok(report), output)
            }
            Err(err) => {
                warn!("{}: {err}", path.display());
                (Err(err), None)
            }
        };
        entries.push(BatchEntry {
            index,
            path: path.to_path_buf(),
            outcome,
            output,
        });
    }

    let tally = BatchTally::from_entries(&entries);
    info!(
        "batch done: {} images, {} good, {} cut, {} flash, {} mixed, {} failed",
        tally.total(),
        tally.good,
        tally.cut,
        tally.flash,
        tally.mixed,
        tally.failed
    );
    Ok(entries)
}
