//! JUnit XML report for CI consumers.
//!
//! One `<testsuite>` per suite run. FAIL results get a `<failure>` child only when
//! they carry a non-empty error; SKIP results get `<skipped/>`; PASS results get none.
//! All text passes through [`escape_attr`] / [`escape_text`], so the document stays
//! well-formed for any input.

use crate::aggregate::aggregate;
use crate::analytics::Analytics;
use crate::model::{TestResult, TestStatus, TestSuiteResult};
use std::time::Duration;

pub fn render(analytics: &Analytics) -> String {
    let m = aggregate(analytics.results());
    let mut xml = String::new();

    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    xml.push('\n');
    xml.push_str(&format!(
        "<testsuites tests=\"{}\" failures=\"{}\" skipped=\"{}\" time=\"{}\">\n",
        m.total_tests,
        m.failed_tests,
        m.skipped_tests,
        seconds(m.total_duration)
    ));
    for suite in analytics.results() {
        write_suite(&mut xml, suite);
    }
    xml.push_str("</testsuites>\n");
    xml
}

fn write_suite(xml: &mut String, suite: &TestSuiteResult) {
    xml.push_str(&format!(
        "  <testsuite name=\"{}\" tests=\"{}\" failures=\"{}\" skipped=\"{}\" time=\"{}\" timestamp=\"{}\">\n",
        escape_attr(&suite.suite_name),
        suite.total_tests,
        suite.failed_tests,
        suite.skipped_tests,
        seconds(suite.duration),
        suite.start_time.format("%Y-%m-%dT%H:%M:%S")
    ));
    xml.push_str("    <properties>\n");
    xml.push_str(&format!(
        "      <property name=\"environment\" value=\"{}\"/>\n",
        escape_attr(&suite.environment)
    ));
    xml.push_str(&format!(
        "      <property name=\"region\" value=\"{}\"/>\n",
        escape_attr(&suite.region)
    ));
    xml.push_str("    </properties>\n");

    for r in &suite.results {
        write_case(xml, r);
    }
    xml.push_str("  </testsuite>\n");
}

fn write_case(xml: &mut String, r: &TestResult) {
    let open = format!(
        r#"    <testcase name="{}" classname="{}" time="{}""#,
        escape_attr(&r.name),
        escape_attr(&r.package),
        seconds(r.duration)
    );
    match r.status {
        TestStatus::Fail if !r.error_text().is_empty() => {
            xml.push_str(&format!("{open}>\n"));
            xml.push_str(&format!(
                "      <failure message=\"{}\">{}</failure>\n",
                escape_attr(r.error_text()),
                escape_text(r.output.as_deref().unwrap_or_default())
            ));
            xml.push_str("    </testcase>\n");
        }
        TestStatus::Skip => {
            xml.push_str(&format!("{open}>\n"));
            xml.push_str("      <skipped/>\n");
            xml.push_str("    </testcase>\n");
        }
        TestStatus::Pass | TestStatus::Fail => {
            xml.push_str(&format!("{open}/>\n"));
        }
    }
}

/// Seconds with three decimals.
fn seconds(d: Duration) -> String {
    format!("{:.3}", d.as_secs_f64())
}

/// Characters XML 1.0 cannot carry even when escaped become U+FFFD.
fn is_xml_char(c: char) -> bool {
    matches!(c,
        '\u{9}' | '\u{A}' | '\u{D}'
        | '\u{20}'..='\u{D7FF}'
        | '\u{E000}'..='\u{FFFD}'
        | '\u{10000}'..='\u{10FFFF}')
}

pub fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c if is_xml_char(c) => out.push(c),
            _ => out.push('\u{FFFD}'),
        }
    }
    out
}

/// Attribute values also escape quotes and whitespace that attribute normalization would eat.
pub fn escape_attr(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\n' => out.push_str("&#10;"),
            '\r' => out.push_str("&#13;"),
            '\t' => out.push_str("&#9;"),
            c if is_xml_char(c) => out.push(c),
            _ => out.push('\u{FFFD}'),
        }
    }
    out
}
