//! Markdown report: summary bullets followed by one table per suite run.

use super::{format_pass_rate, human_duration, REPORT_TITLE};
use crate::aggregate::aggregate;
use crate::analytics::Analytics;

/// Errors longer than this many characters are truncated in table cells.
pub const ERROR_CELL_MAX_CHARS: usize = 50;
/// Characters kept from a truncated error, before the ellipsis.
pub const ERROR_CELL_KEEP_CHARS: usize = 47;

pub fn render(analytics: &Analytics) -> String {
    let m = aggregate(analytics.results());
    let mut md = String::new();

    md.push_str(&format!("# {REPORT_TITLE}\n\n"));
    md.push_str("## Summary\n\n");
    md.push_str(&format!("- **Total Test Suites**: {}\n", m.total_suites));
    md.push_str(&format!("- **Total Tests**: {}\n", m.total_tests));
    md.push_str(&format!("- **Passed**: {}\n", m.passed_tests));
    md.push_str(&format!("- **Failed**: {}\n", m.failed_tests));
    md.push_str(&format!("- **Skipped**: {}\n", m.skipped_tests));
    md.push_str(&format!(
        "- **Pass Rate**: {}\n\n",
        format_pass_rate(m.pass_rate)
    ));

    md.push_str("## Detailed Results\n\n");
    for suite in analytics.results() {
        md.push_str(&format!(
            "### {} ({})\n\n",
            cell(&suite.suite_name),
            cell(&suite.environment)
        ));
        md.push_str("| Test Name | Status | Duration | Category | Error |\n");
        md.push_str("|-----------|--------|----------|----------|-------|\n");
        for r in &suite.results {
            md.push_str(&format!(
                "| {} | {} | {} | {} | {} |\n",
                cell(&r.name),
                r.status,
                human_duration(r.duration),
                cell(&r.category),
                error_cell(r.error_text())
            ));
        }
        md.push('\n');
    }

    md
}

/// Truncation counts the characters of the raw error. Escaping runs afterwards, so
/// an escaped `\|` renders as one character and the visible cell stays within
/// [`ERROR_CELL_MAX_CHARS`].
fn error_cell(error: &str) -> String {
    cell(&truncate_error(error))
}

/// Cut errors over [`ERROR_CELL_MAX_CHARS`] to [`ERROR_CELL_KEEP_CHARS`] plus `...`.
/// Counts characters, not bytes.
pub fn truncate_error(error: &str) -> String {
    if error.chars().count() > ERROR_CELL_MAX_CHARS {
        let kept: String = error.chars().take(ERROR_CELL_KEEP_CHARS).collect();
        format!("{kept}...")
    } else {
        error.to_string()
    }
}

/// Keep a value inside its table cell.
fn cell(s: &str) -> String {
    s.replace('|', "\\|").replace("\r\n", " ").replace(['\n', '\r'], " ")
}
