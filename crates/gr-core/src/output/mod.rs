//! Report rendering for the CLI.
//!
//! Renderers are pure `report -> String` functions; the binary decides where
//! the string goes.

pub mod text;

use gr_common::OutputFormat;

use crate::report::ReconciliationReport;

pub use text::{render_diagnostics, render_entries, render_report};

/// Render a report in the requested format.
pub fn render(
    report: &ReconciliationReport,
    format: OutputFormat,
) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Text => Ok(render_report(report)),
        OutputFormat::Json => serde_json::to_string_pretty(report),
        OutputFormat::Jsonl => serde_json::to_string(report),
    }
}
