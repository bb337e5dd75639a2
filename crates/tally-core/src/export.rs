//! Persist rendered reports as `<reports-dir>/<base>_<YYYY-MM-DD_HH-MM-SS>.<format>`.
//!
//! The timestamp has one-second resolution: two exports of the same base name and
//! format within the same second target the same path, and the later one replaces
//! the earlier. Rendering always happens before the filesystem is touched.

use crate::analytics::Analytics;
use crate::errors::{AnalyticsError, AnalyticsResult};
use crate::report::ReportFormat;
use chrono::{DateTime, Local, TimeZone};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fmt::Display;
use std::path::{Path, PathBuf};

pub const DEFAULT_REPORTS_DIR: &str = "test-reports";

/// strftime pattern for the file name timestamp.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// A report written to disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportedReport {
    pub path: PathBuf,
    pub format: ReportFormat,
    pub bytes: usize,
    /// `sha256:{hex}` of the written content.
    pub sha256: String,
}

/// `<base without .format suffix>_<timestamp>.<format>`
pub fn report_file_name<Tz>(base_name: &str, format: ReportFormat, at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let suffix = format!(".{}", format.extension());
    let stem = base_name.strip_suffix(&suffix).unwrap_or(base_name);
    format!(
        "{}_{}.{}",
        stem,
        at.format(TIMESTAMP_FORMAT),
        format.extension()
    )
}

#[derive(Debug, Clone)]
pub struct Exporter {
    reports_dir: PathBuf,
}

impl Default for Exporter {
    fn default() -> Self {
        Self::new(DEFAULT_REPORTS_DIR)
    }
}

impl Exporter {
    pub fn new(reports_dir: impl Into<PathBuf>) -> Self {
        Self {
            reports_dir: reports_dir.into(),
        }
    }

    pub fn reports_dir(&self) -> &Path {
        &self.reports_dir
    }

    /// Render `format` and write it, stamped with the local time.
    pub fn export(
        &self,
        analytics: &Analytics,
        base_name: &str,
        format: ReportFormat,
    ) -> AnalyticsResult<ExportedReport> {
        self.export_at(analytics, base_name, format, &Local::now())
    }

    /// As [`Exporter::export`] with an explicit timestamp.
    pub fn export_at<Tz>(
        &self,
        analytics: &Analytics,
        base_name: &str,
        format: ReportFormat,
        at: &DateTime<Tz>,
    ) -> AnalyticsResult<ExportedReport>
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let rendered = analytics.render(format)?;
        self.write(base_name, format, at, &rendered)
    }

    /// Render every format first, then write them all with one shared timestamp.
    /// Nothing is written when any format fails to render.
    pub fn export_all(
        &self,
        analytics: &Analytics,
        base_name: &str,
        formats: &[ReportFormat],
    ) -> AnalyticsResult<Vec<ExportedReport>> {
        let at = Local::now();
        let rendered = formats
            .iter()
            .map(|&f| analytics.render(f).map(|out| (f, out)))
            .collect::<AnalyticsResult<Vec<_>>>()?;
        rendered
            .iter()
            .map(|(f, out)| self.write(base_name, *f, &at, out))
            .collect()
    }

    fn write<Tz>(
        &self,
        base_name: &str,
        format: ReportFormat,
        at: &DateTime<Tz>,
        content: &str,
    ) -> AnalyticsResult<ExportedReport>
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        std::fs::create_dir_all(&self.reports_dir)
            .map_err(|e| AnalyticsError::write(&self.reports_dir, e))?;

        let path = self
            .reports_dir
            .join(report_file_name(base_name, format, at));
        write_file_atomic(&path, content.as_bytes())?;

        let report = ExportedReport {
            path,
            format,
            bytes: content.len(),
            sha256: content_digest(content),
        };
        tracing::info!(
            path = %report.path.display(),
            format = %format,
            bytes = report.bytes,
            "exported report"
        );
        Ok(report)
    }
}

/// Temp file in the destination directory, then rename over `path`.
fn write_file_atomic(path: &Path, bytes: &[u8]) -> AnalyticsResult<()> {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    let base = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("report");
    let tmp_path = parent.join(format!(".{}.tmp-{}", base, std::process::id()));

    std::fs::write(&tmp_path, bytes).map_err(|e| AnalyticsError::write(&tmp_path, e))?;
    if let Err(e) = std::fs::rename(&tmp_path, path) {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(AnalyticsError::write(path, e));
    }
    Ok(())
}

/// `sha256:{hex}` of `content`.
fn content_digest(content: &str) -> String {
    format!("sha256:{}", hex::encode(Sha256::digest(content.as_bytes())))
}
