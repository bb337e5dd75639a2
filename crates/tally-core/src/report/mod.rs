pub mod html;
pub mod json;
pub mod junit;
pub mod markdown;

use crate::analytics::Analytics;
use crate::errors::{AnalyticsError, AnalyticsResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Title shared by the human-readable reports.
pub const REPORT_TITLE: &str = "Test Analytics Report";

/// Output format of a rendered report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Json,
    Html,
    Markdown,
    Junit,
}

impl ReportFormat {
    pub const ALL: [ReportFormat; 4] = [Self::Json, Self::Html, Self::Markdown, Self::Junit];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Html => "html",
            Self::Markdown => "markdown",
            Self::Junit => "junit",
        }
    }

    /// File extension for exported reports. Same as the format name.
    pub fn extension(self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportFormat {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| AnalyticsError::UnsupportedFormat {
                format: s.to_string(),
            })
    }
}

/// Render the whole collection in `format`.
pub fn render(format: ReportFormat, analytics: &Analytics) -> AnalyticsResult<String> {
    let out = match format {
        ReportFormat::Json => json::render(analytics)?,
        ReportFormat::Html => html::render(analytics),
        ReportFormat::Markdown => markdown::render(analytics),
        ReportFormat::Junit => junit::render(analytics),
    };
    tracing::debug!(format = %format, bytes = out.len(), "rendered report");
    Ok(out)
}

/// Human duration for table cells, e.g. `1s 500ms`.
pub(crate) fn human_duration(d: Duration) -> String {
    humantime::format_duration(d).to_string()
}

/// Pass rate with one decimal, or `n/a` when there were no tests.
pub(crate) fn format_pass_rate(rate: Option<f64>) -> String {
    match rate {
        Some(r) => format!("{:.1}%", r),
        None => "n/a".to_string(),
    }
}
