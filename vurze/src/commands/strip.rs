//! Decorator stripping command.

use crate::output;
use crate::strip::{AnnotationStripper, StripResult};
use crate::utils::normalize_display_path;

use anyhow::{Context, Result};
use rayon::prelude::*;
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Options for the strip command
#[derive(Debug, Default)]
#[allow(clippy::struct_excessive_bools)]
pub struct StripOptions {
    /// Namespace whose decorators are removed
    pub namespace: String,
    /// Rewrite files in place
    pub write: bool,
    /// Fail when any file would change
    pub check: bool,
    /// Emit JSON instead of tables
    pub json: bool,
    /// Print each processed file to stderr
    pub verbose: bool,
    /// Only print the summary
    pub quiet: bool,
    /// Extra folders to skip
    pub exclude: Vec<String>,
}

/// A file that carried namespace decorators.
#[derive(Debug, Serialize)]
pub struct FileChange {
    /// Display path
    pub file: String,
    /// What was (or would be) removed
    #[serde(flatten)]
    pub result: StripResult,
    /// Whether the file was rewritten
    pub written: bool,
}

/// A file that could not be processed.
#[derive(Debug, Serialize)]
pub struct FileFailure {
    /// Display path
    pub file: String,
    /// Error message
    pub error: String,
}

/// Aggregate result of a strip run
#[derive(Debug, Serialize)]
pub struct StripReport {
    /// Namespace that was stripped
    pub namespace: String,
    /// Number of files parsed
    pub files_scanned: usize,
    /// Files with namespace decorators, sorted by path
    pub changed: Vec<FileChange>,
    /// Files that failed, sorted by path
    pub failures: Vec<FileFailure>,
}

impl StripReport {
    /// Exit code for this report: 1 on failures, or on pending changes under `--check`.
    pub fn exit_code(&self, check: bool) -> i32 {
        i32::from(!self.failures.is_empty() || (check && !self.changed.is_empty()))
    }
}

/// Strips one file, writing it back when `write` is set and something was removed.
///
/// # Errors
///
/// Returns an error if the file cannot be read, does not parse, or cannot be written.
pub fn strip_file(path: &Path, stripper: &AnnotationStripper, write: bool) -> Result<StripResult> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let result = stripper
        .strip(&source)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    if write && result.found {
        fs::write(path, &result.text)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }
    Ok(result)
}

/// Strips every file in `files` in parallel and collects a report.
///
/// Per-file failures are recorded, not propagated.
///
/// # Errors
///
/// Returns an error if the namespace is invalid.
pub fn strip_files(files: &[PathBuf], options: &StripOptions) -> Result<StripReport> {
    let stripper = AnnotationStripper::new(options.namespace.clone())?;

    let progress = if options.json || options.quiet || files.len() < 2 {
        indicatif::ProgressBar::hidden()
    } else {
        output::create_progress_bar(files.len() as u64)
    };

    let outcomes: Vec<(String, Result<StripResult>)> = files
        .par_iter()
        .map(|path| {
            if options.verbose {
                eprintln!("Processing {}", path.display());
            }
            let outcome = strip_file(path, &stripper, options.write);
            progress.inc(1);
            (normalize_display_path(path), outcome)
        })
        .collect();
    progress.finish_and_clear();

    let mut changed = Vec::new();
    let mut failures = Vec::new();
    for (file, outcome) in outcomes {
        match outcome {
            Ok(result) if result.found => changed.push(FileChange {
                file,
                result,
                written: options.write,
            }),
            Ok(_) => {}
            Err(e) => failures.push(FileFailure {
                file,
                error: format!("{e:#}"),
            }),
        }
    }
    changed.sort_by(|a, b| a.file.cmp(&b.file));
    failures.sort_by(|a, b| a.file.cmp(&b.file));

    Ok(StripReport {
        namespace: options.namespace.clone(),
        files_scanned: files.len(),
        changed,
        failures,
    })
}

/// Runs the strip command over `files` and prints the report.
///
/// # Errors
///
/// Returns an error if the namespace is invalid or writing output fails.
pub fn run_strip<W: Write>(files: &[PathBuf], options: &StripOptions, mut writer: W) -> Result<i32> {
    let report = strip_files(files, options)?;

    if options.json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&report)?)?;
    } else {
        if !options.quiet {
            output::print_changes(&mut writer, &report, options.write)?;
            output::print_failures(&mut writer, &report)?;
        }
        output::print_summary(&mut writer, &report, options.write)?;
    }

    Ok(report.exit_code(options.check))
}
