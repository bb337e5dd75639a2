//! Report configuration: YAML file, then environment overrides.
//!
//! | Variable | Description |
//! |----------|-------------|
//! | `TALLY_REPORTS_DIR` | Directory exported reports are written to (default: `test-reports`) |
//! | `TALLY_BASE_NAME` | Base file name for exported reports (default: `test-report`) |
//! | `TALLY_FORMATS` | Comma-separated formats to export (default: all) |
//! | `TALLY_SLOW_THRESHOLD` | Slow-test threshold, e.g. `5s`, `1m 30s` (default: `5s`) |

use crate::errors::{AnalyticsError, AnalyticsResult};
use crate::export::DEFAULT_REPORTS_DIR;
use crate::report::ReportFormat;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_BASE_NAME: &str = "test-report";
pub const DEFAULT_SLOW_THRESHOLD: Duration = Duration::from_secs(5);

mod serde_humantime {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(d: &Duration, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        s.serialize_str(&humantime::format_duration(*d).to_string())
    }

    pub fn deserialize<'de, D>(d: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(d)?;
        humantime::parse_duration(&s).map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    pub reports_dir: PathBuf,
    pub base_name: String,
    pub formats: Vec<ReportFormat>,
    #[serde(with = "serde_humantime")]
    pub slow_threshold: Duration,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            reports_dir: PathBuf::from(DEFAULT_REPORTS_DIR),
            base_name: DEFAULT_BASE_NAME.to_string(),
            formats: ReportFormat::ALL.to_vec(),
            slow_threshold: DEFAULT_SLOW_THRESHOLD,
        }
    }
}

impl ReportConfig {
    /// Parse a YAML config file. Missing keys take their defaults.
    pub fn load(path: &Path) -> AnalyticsResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| AnalyticsError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_yaml(&content).map_err(|e| AnalyticsError::Config {
            message: format!("{}: {}", path.display(), e),
        })
    }

    pub fn from_yaml(content: &str) -> AnalyticsResult<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| AnalyticsError::Config {
            message: e.to_string(),
        })
    }

    /// Defaults with `TALLY_*` environment overrides applied.
    pub fn from_env() -> AnalyticsResult<Self> {
        Self::default().with_env_overrides()
    }

    pub fn with_env_overrides(self) -> AnalyticsResult<Self> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup`, keyed by environment variable name.
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> AnalyticsResult<Self> {
        if let Some(dir) = lookup("TALLY_REPORTS_DIR") {
            self.reports_dir = PathBuf::from(dir);
        }
        if let Some(base) = lookup("TALLY_BASE_NAME") {
            self.base_name = base;
        }
        if let Some(formats) = lookup("TALLY_FORMATS") {
            self.formats = parse_formats(&formats)?;
        }
        if let Some(threshold) = lookup("TALLY_SLOW_THRESHOLD") {
            self.slow_threshold =
                humantime::parse_duration(&threshold).map_err(|e| AnalyticsError::Config {
                    message: format!("TALLY_SLOW_THRESHOLD={threshold}: {e}"),
                })?;
        }
        Ok(self)
    }
}

/// Parse a comma-separated format list, e.g. `json,junit`.
pub fn parse_formats(list: &str) -> AnalyticsResult<Vec<ReportFormat>> {
    let mut formats = Vec::new();
    for name in list.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let format: ReportFormat = name.parse()?;
        if !formats.contains(&format) {
            formats.push(format);
        }
    }
    Ok(formats)
}
