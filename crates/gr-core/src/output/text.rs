//! Plain-text rendering of reconciliation results.

use crate::reconcile::{DiagnosticItem, DiagnosticsReport, ValidEntry};
use crate::report::ReconciliationReport;

fn push_section(lines: &mut Vec<String>, title: &str, items: &[DiagnosticItem]) {
    if items.is_empty() {
        return;
    }
    lines.push(format!("{}:", title));
    for item in items {
        lines.push(format!(" - {} (role {})", item.path, item.role_ref));
    }
}

/// Render the validation block: role total followed by each non-empty
/// diagnostic category.
pub fn render_diagnostics(diagnostics: &DiagnosticsReport, role_count: usize) -> String {
    let mut lines = vec![
        "=== Validation ===".to_string(),
        format!("Total of {} roles.", role_count),
    ];
    push_section(&mut lines, "Missing", &diagnostics.missing);
    push_section(&mut lines, "Too high", &diagnostics.too_high);
    push_section(&mut lines, "Managed", &diagnostics.managed);
    if diagnostics.is_clean() {
        lines.push("No problems found.".to_string());
    }
    lines.join("\n")
}

/// Render usable classes, one per line, with their usable weapons.
pub fn render_entries(entries: &[ValidEntry]) -> String {
    if entries.is_empty() {
        return "No usable classes.".to_string();
    }
    let mut lines = vec!["Usable classes:".to_string()];
    for entry in entries {
        if entry.weapons.is_empty() {
            lines.push(format!(" - {} ({})", entry.label, entry.display_name));
        } else {
            let weapons: Vec<&str> = entry.weapons.iter().map(|w| w.as_str()).collect();
            lines.push(format!(
                " - {} ({}): {}",
                entry.label,
                entry.display_name,
                weapons.join(", ")
            ));
        }
    }
    lines.join("\n")
}

/// Full text report: header, validation block, usable entries.
pub fn render_report(report: &ReconciliationReport) -> String {
    let digest = &report.config.digest;
    let short_digest: String = digest.chars().take(12).collect();
    let mut header = format!(
        "Pass {}  ceiling={}  config={}",
        report.pass_id, report.rank_ceiling, short_digest,
    );
    if let Some(guild) = &report.guild_id {
        header.push_str(&format!("  guild={}", guild));
    }
    format!(
        "{}\n\n{}\n\n{}\n",
        header,
        render_diagnostics(&report.diagnostics, report.role_count),
        render_entries(&report.classes),
    )
}
