use crate::commands::StripReport;
use colored::Colorize;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::io::Write;
use std::time::Duration;

/// Create a progress bar with file count.
///
/// In test mode, returns a hidden progress bar to avoid polluting test output.
#[must_use]
pub fn create_progress_bar(total_files: u64) -> ProgressBar {
    if cfg!(test) {
        return ProgressBar::hidden();
    }

    let pb =
        ProgressBar::with_draw_target(Some(total_files), ProgressDrawTarget::stderr_with_hz(20));
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓░"),
    );
    pb.set_message("stripping...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Print the per-file table of removed decorators.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_changes(
    writer: &mut impl Write,
    report: &StripReport,
    written: bool,
) -> std::io::Result<()> {
    if report.changed.is_empty() {
        return Ok(());
    }

    let title = if written {
        format!("Removed @{}.* decorators:", report.namespace)
    } else {
        format!("[DRY-RUN] @{}.* decorators that would be removed:", report.namespace)
    };
    writeln!(writer, "\n{}", title.yellow().bold())?;

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("File").add_attribute(Attribute::Bold),
            Cell::new("Line").add_attribute(Attribute::Bold),
            Cell::new("Decorator").add_attribute(Attribute::Bold),
            Cell::new("Definition").add_attribute(Attribute::Bold),
        ]);

    for file in &report.changed {
        for removed in &file.result.removed {
            table.add_row(vec![
                Cell::new(&file.file),
                Cell::new(removed.line),
                Cell::new(format!("@{}", removed.decorator)).fg(Color::Yellow),
                Cell::new(&removed.definition),
            ]);
        }
    }
    writeln!(writer, "{table}")?;
    Ok(())
}

/// Print files that could not be processed.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_failures(writer: &mut impl Write, report: &StripReport) -> std::io::Result<()> {
    if report.failures.is_empty() {
        return Ok(());
    }
    writeln!(writer, "\n{}", "Failed files:".red().bold())?;
    for failure in &report.failures {
        writeln!(writer, "  {} {}", failure.file.red(), failure.error.dimmed())?;
    }
    Ok(())
}

/// Print the one-line summary.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_summary(
    writer: &mut impl Write,
    report: &StripReport,
    written: bool,
) -> std::io::Result<()> {
    let decorators: usize = report
        .changed
        .iter()
        .map(|file| file.result.removed_lines.len())
        .sum();
    let verb = if written { "removed" } else { "to remove" };
    let status = if report.failures.is_empty() {
        "[OK]".green().bold()
    } else {
        "[!!]".red().bold()
    };
    writeln!(
        writer,
        "\n{} {} file(s) scanned, {} line(s) {} in {} file(s), {} failure(s)",
        status,
        report.files_scanned,
        decorators.to_string().cyan().bold(),
        verb,
        report.changed.len(),
        report.failures.len()
    )?;
    Ok(())
}

/// Print a success line.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_ok(writer: &mut impl Write, message: &str) -> std::io::Result<()> {
    writeln!(writer, "{} {}", "[OK]".green().bold(), message)
}

/// Print a warning line.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_warning(writer: &mut impl Write, message: &str) -> std::io::Result<()> {
    writeln!(writer, "{} {}", "[WARN]".yellow().bold(), message)
}

/// Print an error line.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_error(writer: &mut impl Write, message: &str) -> std::io::Result<()> {
    writeln!(writer, "{} {}", "[ERROR]".red().bold(), message)
}
