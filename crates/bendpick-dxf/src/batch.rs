//! Batch processing of DXF files
//!
//! A run takes either one `.dxf` file or a folder of them and writes each
//! processed drawing, under its own file name, into an output folder next
//! to the input.

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::Serialize;
use tracing::{info, warn};

use bendpick_core::PickSummary;
use bendpick_settings::Settings;

use crate::drawing::PickDrawing;
use crate::error::{PickFileError, PickFileResult};

/// Result of one processed file.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub summary: PickSummary,
}

/// One file of a batch, processed or failed.
#[derive(Debug)]
pub struct FileOutcome {
    pub input: PathBuf,
    pub result: PickFileResult<FileReport>,
}

/// Result of a whole batch.
#[derive(Debug)]
pub struct BatchReport {
    pub output_dir: PathBuf,
    pub files: Vec<FileOutcome>,
    pub total_picks: usize,
}

impl BatchReport {
    pub fn succeeded(&self) -> impl Iterator<Item = &FileReport> {
        self.files.iter().filter_map(|f| f.result.as_ref().ok())
    }

    pub fn failed(&self) -> impl Iterator<Item = (&Path, &PickFileError)> {
        self.files
            .iter()
            .filter_map(|f| f.result.as_ref().err().map(|e| (f.input.as_path(), e)))
    }

    pub fn all_succeeded(&self) -> bool {
        self.files.iter().all(|f| f.result.is_ok())
    }
}

fn is_dxf(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("dxf"))
}

/// DXF files at `path`: the file itself, or the folder's `.dxf` files sorted
/// by path. Subfolders are not searched.
pub fn find_dxf_files(path: &Path) -> PickFileResult<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(if is_dxf(path) { vec![path.to_path_buf()] } else { Vec::new() });
    }
    if !path.is_dir() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in std::fs::read_dir(path)? {
        let candidate = entry?.path();
        if is_dxf(&candidate) {
            files.push(candidate);
        }
    }
    files.sort();
    Ok(files)
}

/// Output folder for `input`: `<input folder>/<folder_name>`.
pub fn output_dir(input: &Path, settings: &Settings) -> PathBuf {
    let base = if input.is_dir() {
        input
    } else {
        input
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."))
    };
    base.join(&settings.output.folder_name)
}

/// Adds picks to one drawing and saves it into `output_dir`.
pub fn process_file(input: &Path, output_dir: &Path, settings: &Settings) -> PickFileResult<FileReport> {
    let file_name = input
        .file_name()
        .ok_or_else(|| PickFileError::InvalidPath(input.to_path_buf()))?;
    let output = output_dir.join(file_name);

    let mut drawing = PickDrawing::load(input)?;
    let summary = drawing.add_picks(&settings.classification, &settings.pick)?;
    drawing.save(&output)?;

    info!(
        "{}: {} bend lines in {} groups, {} contour lines, {} picks, {} trims",
        input.display(),
        summary.bend_lines,
        summary.groups,
        summary.contour_lines,
        summary.picks_added,
        summary.trims_applied
    );

    Ok(FileReport {
        input: input.to_path_buf(),
        output,
        summary,
    })
}

/// Processes every DXF file at `input`.
///
/// A file that fails is recorded in the report; the rest of the batch still
/// runs.
pub fn process_path(input: &Path, settings: &Settings) -> PickFileResult<BatchReport> {
    settings.validate()?;

    let files = find_dxf_files(input)?;
    if files.is_empty() {
        return Err(PickFileError::NoDxfFiles(input.to_path_buf()));
    }

    let out_dir = output_dir(input, settings);
    std::fs::create_dir_all(&out_dir)?;
    info!(
        "Processing {} DXF file(s) from {} into {}",
        files.len(),
        input.display(),
        out_dir.display()
    );

    let total = files.len();
    let run_one = |(index, path): (usize, &PathBuf)| {
        info!("[{}/{}] {}", index + 1, total, path.display());
        let result = process_file(path, &out_dir, settings);
        if let Err(e) = &result {
            warn!("Failed to process {}: {}", path.display(), e);
        }
        FileOutcome {
            input: path.clone(),
            result,
        }
    };

    let outcomes: Vec<FileOutcome> = if settings.output.parallel {
        files.par_iter().enumerate().map(run_one).collect()
    } else {
        files.iter().enumerate().map(run_one).collect()
    };

    let total_picks = outcomes
        .iter()
        .filter_map(|f| f.result.as_ref().ok())
        .map(|r| r.summary.picks_added)
        .sum();

    let report = BatchReport {
        output_dir: out_dir,
        files: outcomes,
        total_picks,
    };
    info!(
        "Processed {}/{} file(s), {} picks added",
        report.succeeded().count(),
        total,
        report.total_picks
    );
    Ok(report)
}
