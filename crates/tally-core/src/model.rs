//! Result model: one executed test case, one suite run, and the optional
//! coverage and performance records attached to a run.
//!
//! Durations are serialized as integer nanoseconds and timestamps as RFC 3339,
//! so a JSON document reproduces the exact values it was written from.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Serde helpers: `Duration` as `u64` nanoseconds (lossless for any run shorter than ~584 years).
pub(crate) mod serde_duration {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    fn to_nanos(d: &Duration) -> Result<u64, std::num::TryFromIntError> {
        u64::try_from(d.as_nanos())
    }

    pub fn serialize<S>(d: &Duration, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let nanos = to_nanos(d).map_err(serde::ser::Error::custom)?;
        s.serialize_u64(nanos)
    }

    pub fn deserialize<'de, D>(d: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Duration::from_nanos(u64::deserialize(d)?))
    }

    pub mod seq {
        use super::*;

        pub fn serialize<S>(v: &[Duration], s: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            let nanos = v
                .iter()
                .map(to_nanos)
                .collect::<Result<Vec<_>, _>>()
                .map_err(serde::ser::Error::custom)?;
            nanos.serialize(s)
        }

        pub fn deserialize<'de, D>(d: D) -> Result<Vec<Duration>, D::Error>
        where
            D: Deserializer<'de>,
        {
            let nanos: Vec<u64> = Vec::deserialize(d)?;
            Ok(nanos.into_iter().map(Duration::from_nanos).collect())
        }
    }
}

/// Outcome of a single test case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TestStatus {
    Pass,
    Fail,
    Skip,
}

impl TestStatus {
    /// Upper-case wire name: `PASS`, `FAIL` or `SKIP`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pass => "PASS",
            Self::Fail => "FAIL",
            Self::Skip => "SKIP",
        }
    }

    /// Lower-cased status. Used as the HTML row class and as the breakdown key.
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Pass => "pass",
            Self::Fail => "fail",
            Self::Skip => "skip",
        }
    }
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown test status: {0} (expected PASS, FAIL or SKIP)")]
pub struct UnknownStatus(pub String);

impl FromStr for TestStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PASS" => Ok(Self::Pass),
            "FAIL" => Ok(Self::Fail),
            "SKIP" => Ok(Self::Skip),
            _ => Err(UnknownStatus(s.to_string())),
        }
    }
}

/// One executed test case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    pub name: String,
    pub package: String,
    pub status: TestStatus,
    #[serde(with = "crate::model::serde_duration")]
    pub duration: Duration,
    /// Failure message. Present for FAIL results by convention only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Raw output captured from the test.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    pub timestamp: DateTime<Utc>,
    /// Free-form classification, e.g. "unit", "chaos", "cost".
    pub category: String,
}

impl TestResult {
    pub fn new(
        name: impl Into<String>,
        package: impl Into<String>,
        status: TestStatus,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            name: name.into(),
            package: package.into(),
            status,
            duration: Duration::ZERO,
            error: None,
            output: None,
            timestamp,
            category: String::new(),
        }
    }

    pub fn pass(name: impl Into<String>, package: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self::new(name, package, TestStatus::Pass, timestamp)
    }

    pub fn fail(
        name: impl Into<String>,
        package: impl Into<String>,
        timestamp: DateTime<Utc>,
        error: impl Into<String>,
    ) -> Self {
        Self::new(name, package, TestStatus::Fail, timestamp).with_error(error)
    }

    pub fn skip(name: impl Into<String>, package: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self::new(name, package, TestStatus::Skip, timestamp)
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    pub fn with_output(mut self, output: impl Into<String>) -> Self {
        self.output = Some(output.into());
        self
    }

    /// Error text, empty when absent.
    pub fn error_text(&self) -> &str {
        self.error.as_deref().unwrap_or_default()
    }
}

/// Code coverage measured for a suite run.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CoverageInfo {
    /// Overall coverage percentage (0-100)
    pub percentage: f64,
    pub functions: usize,
    pub statements: usize,
    #[serde(default)]
    pub file_coverage: BTreeMap<String, f64>,
    #[serde(default)]
    pub package_coverage: BTreeMap<String, f64>,
}

/// Performance measurements taken during a suite run.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PerfMetrics {
    #[serde(with = "crate::model::serde_duration")]
    pub avg_response_time: Duration,
    #[serde(with = "crate::model::serde_duration")]
    pub min_response_time: Duration,
    #[serde(with = "crate::model::serde_duration")]
    pub max_response_time: Duration,
    /// Operations (or bytes) per unit time; the unit is agreed with the producer.
    pub throughput: f64,
    /// Fraction of failed operations (0.0 to 1.0)
    pub error_rate: f64,
    /// Utilization per resource, e.g. "cpu", "memory".
    #[serde(default)]
    pub resource_usage: BTreeMap<String, f64>,
}

/// One execution of a named suite in one environment and region.
///
/// Counters and `duration` are stored, not derived. Use [`TestSuiteResult::from_results`]
/// to build a run whose counters agree with its results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestSuiteResult {
    pub suite_name: String,
    pub environment: String,
    pub region: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[serde(with = "crate::model::serde_duration")]
    pub duration: Duration,
    pub total_tests: usize,
    pub passed_tests: usize,
    pub failed_tests: usize,
    pub skipped_tests: usize,
    /// Results in execution order.
    #[serde(default)]
    pub results: Vec<TestResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coverage: Option<CoverageInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub performance: Option<PerfMetrics>,
}

impl TestSuiteResult {
    /// Build a suite run, deriving counters from `results` and `duration` from the time span.
    ///
    /// An `end_time` earlier than `start_time` yields a zero duration.
    pub fn from_results(
        suite_name: impl Into<String>,
        environment: impl Into<String>,
        region: impl Into<String>,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        results: Vec<TestResult>,
    ) -> Self {
        let duration = (end_time - start_time).to_std().unwrap_or(Duration::ZERO);
        let count = |status: TestStatus| results.iter().filter(|r| r.status == status).count();
        Self {
            suite_name: suite_name.into(),
            environment: environment.into(),
            region: region.into(),
            start_time,
            end_time,
            duration,
            total_tests: results.len(),
            passed_tests: count(TestStatus::Pass),
            failed_tests: count(TestStatus::Fail),
            skipped_tests: count(TestStatus::Skip),
            results,
            coverage: None,
            performance: None,
        }
    }

    pub fn with_coverage(mut self, coverage: CoverageInfo) -> Self {
        self.coverage = Some(coverage);
        self
    }

    pub fn with_performance(mut self, performance: PerfMetrics) -> Self {
        self.performance = Some(performance);
        self
    }

    /// True when `total == passed + failed + skipped`.
    pub fn is_consistent(&self) -> bool {
        self.passed_tests
            .checked_add(self.failed_tests)
            .and_then(|n| n.checked_add(self.skipped_tests))
            == Some(self.total_tests)
    }

    /// Pass rate in percent, or 0 for a run with no tests.
    pub fn pass_rate_or_zero(&self) -> f64 {
        if self.total_tests > 0 {
            self.passed_tests as f64 / self.total_tests as f64 * 100.0
        } else {
            0.0
        }
    }
}
