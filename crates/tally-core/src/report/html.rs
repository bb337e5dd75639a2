//! Static HTML report.
//!
//! Rows carry the lower-cased status (`pass`, `fail`, `skip`) as their CSS class.

use super::{format_pass_rate, human_duration, REPORT_TITLE};
use crate::aggregate::aggregate;
use crate::analytics::Analytics;

const STYLE: &str = r#"        body { font-family: Arial, sans-serif; margin: 20px; }
        .summary { background: #f0f0f0; padding: 20px; border-radius: 5px; margin-bottom: 20px; }
        .pass { border-color: #28a745; background: #d4edda; }
        .fail { border-color: #dc3545; background: #f8d7da; }
        .skip { border-color: #ffc107; background: #fff3cd; }
        .metric { display: inline-block; margin: 10px; padding: 10px; background: white; border-radius: 5px; }
        table { width: 100%; border-collapse: collapse; margin: 20px 0; }
        th, td { border: 1px solid #ddd; padding: 8px; text-align: left; }
        th { background-color: #f2f2f2; }
"#;

pub fn render(analytics: &Analytics) -> String {
    let m = aggregate(analytics.results());
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n    <meta charset=\"utf-8\">\n");
    html.push_str(&format!("    <title>{REPORT_TITLE}</title>\n"));
    html.push_str("    <style>\n");
    html.push_str(STYLE);
    html.push_str("    </style>\n</head>\n<body>\n");
    html.push_str(&format!("<h1>{REPORT_TITLE}</h1>\n"));

    html.push_str("<div class=\"summary\">\n<h2>Summary</h2>\n");
    metric(&mut html, "Total Test Suites", &m.total_suites.to_string());
    metric(&mut html, "Total Tests", &m.total_tests.to_string());
    metric(&mut html, "Passed", &m.passed_tests.to_string());
    metric(&mut html, "Failed", &m.failed_tests.to_string());
    metric(&mut html, "Skipped", &m.skipped_tests.to_string());
    metric(&mut html, "Pass Rate", &format_pass_rate(m.pass_rate));
    html.push_str("</div>\n");

    html.push_str("<h2>Detailed Results</h2>\n");
    for suite in analytics.results() {
        html.push_str(&format!(
            "<h3>{} ({})</h3>\n",
            escape(&suite.suite_name),
            escape(&suite.environment)
        ));
        html.push_str("<table>\n");
        html.push_str(
            "<tr><th>Test Name</th><th>Status</th><th>Duration</th><th>Category</th><th>Error</th></tr>\n",
        );
        for r in &suite.results {
            html.push_str(&format!(
                "<tr class=\"{}\"><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                r.status.css_class(),
                escape(&r.name),
                r.status,
                human_duration(r.duration),
                escape(&r.category),
                escape(r.error_text())
            ));
        }
        html.push_str("</table>\n");
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn metric(html: &mut String, label: &str, value: &str) {
    html.push_str(&format!(
        "<div class=\"metric\">{label}: {}</div>\n",
        escape(value)
    ));
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
