//! CLI output formatting.
//!
//! Every computed image is shown as a header line (positional index + path)
//! followed by indented context lines:
//!
//! ```text
//! 001 hokusai/wave.jpg
//!     Mean RGB: 92.41, 121.07, 140.88
//!     Brightness: 55.25
//!     Saturation: 34.40
//! 002 hokusai/broken.png
//!     Error: Failed to decode image: Decode failed: ...
//!
//! Computed 1 of 2 images, 1 failed
//! ```
//!
//! Each `format_*` function returns lines for testability; `print_*`
//! wrappers write them to stdout. Format functions are pure: no I/O, no
//! side effects.

use crate::imaging::MetricsResult;
use crate::process::{ProcessEvent, ProcessReport};
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Path relative to `root` when possible, for shorter output.
fn display_path(path: &Path, root: Option<&Path>) -> String {
    root.and_then(|r| path.strip_prefix(r).ok())
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(path)
        .display()
        .to_string()
}

/// The three context lines for a successful computation.
pub fn format_metrics(result: &MetricsResult, depth: usize) -> Vec<String> {
    let pad = indent(depth);
    vec![
        format!(
            "{}Mean RGB: {:.2}, {:.2}, {:.2}",
            pad, result.mean_red, result.mean_green, result.mean_blue
        ),
        format!("{}Brightness: {:.2}", pad, result.brightness),
        format!("{}Saturation: {:.2}", pad, result.saturation),
    ]
}

/// Header + context lines for one image.
pub fn format_image(
    index: usize,
    path: &Path,
    root: Option<&Path>,
    result: Result<&MetricsResult, &str>,
) -> Vec<String> {
    let mut lines = vec![format!(
        "{} {}",
        format_index(index + 1),
        display_path(path, root)
    )];
    match result {
        Ok(metrics) => lines.extend(format_metrics(metrics, 1)),
        Err(error) => lines.push(format!("{}Error: {}", indent(1), error)),
    }
    lines
}

/// Lines for a progress event from the batch processor.
pub fn format_process_event(event: &ProcessEvent, root: Option<&Path>) -> Vec<String> {
    match event {
        ProcessEvent::Computed {
            index,
            path,
            result,
        } => format_image(*index, path, root, Ok(result)),
        ProcessEvent::Failed { index, path, error } => {
            format_image(*index, path, root, Err(error.as_str()))
        }
    }
}

/// One-line summary of a batch.
pub fn format_summary(report: &ProcessReport) -> String {
    let total = report.images.len();
    let noun = if total == 1 { "image" } else { "images" };
    match report.failed() {
        0 => format!("Computed {} {}", total, noun),
        failed => format!(
            "Computed {} of {} {}, {} failed",
            report.succeeded(),
            total,
            noun,
            failed
        ),
    }
}

/// Print every outcome of a report followed by the summary.
pub fn print_report(report: &ProcessReport, root: Option<&Path>) {
    for (index, outcome) in report.images.iter().enumerate() {
        let result = match (&outcome.metrics, &outcome.error) {
            (Some(metrics), _) => Ok(metrics),
            (None, error) => Err(error.as_deref().unwrap_or("unknown error")),
        };
        for line in format_image(index, &outcome.path, root, result) {
            println!("{}", line);
        }
    }
    println!();
    println!("{}", format_summary(report));
}
