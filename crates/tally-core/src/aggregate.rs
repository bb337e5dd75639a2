//! Aggregation of suite runs into a metrics snapshot.
//!
//! Test totals are summed from each suite's stored counters, never recounted from
//! the result list; the category and package breakdowns are the only place the
//! individual results are tallied. Rates over an empty denominator are `None`.

use crate::errors::{AnalyticsError, AnalyticsResult};
use crate::model::{TestResult, TestStatus, TestSuiteResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Per-key tally of individual results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl StatusCounts {
    pub fn record(&mut self, status: TestStatus) {
        self.total += 1;
        match status {
            TestStatus::Pass => self.passed += 1,
            TestStatus::Fail => self.failed += 1,
            TestStatus::Skip => self.skipped += 1,
        }
    }

    /// Lookup by the lower-cased key used in the serialized breakdowns.
    pub fn get(&self, key: &str) -> Option<usize> {
        match key {
            "total" => Some(self.total),
            "passed" | "pass" => Some(self.passed),
            "failed" | "fail" => Some(self.failed),
            "skipped" | "skip" => Some(self.skipped),
            _ => None,
        }
    }
}

/// Aggregated metrics across all suite runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub total_suites: usize,
    pub total_tests: usize,
    pub passed_tests: usize,
    pub failed_tests: usize,
    pub skipped_tests: usize,
    /// Percentage of passed tests; `None` when there are no tests.
    pub pass_rate: Option<f64>,
    #[serde(with = "crate::model::serde_duration")]
    pub total_duration: Duration,
    /// Mean suite duration; `None` when there are no suites.
    #[serde(with = "opt_duration")]
    pub avg_duration: Option<Duration>,
    pub category_stats: BTreeMap<String, StatusCounts>,
    pub package_stats: BTreeMap<String, StatusCounts>,
}

mod opt_duration {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(v: &Option<Duration>, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match v {
            Some(d) => crate::model::serde_duration::serialize(d, s),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(d: D) -> Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<u64>::deserialize(d)?.map(Duration::from_nanos))
    }
}

/// `passed / total * 100`.
pub fn pass_rate(passed: usize, total: usize) -> AnalyticsResult<f64> {
    if total == 0 {
        return Err(AnalyticsError::DivisionUndefined {
            quantity: "pass rate",
        });
    }
    Ok(passed as f64 / total as f64 * 100.0)
}

/// `total / count`, truncated to whole nanoseconds.
pub fn average_duration(total: Duration, count: usize) -> AnalyticsResult<Duration> {
    if count == 0 {
        return Err(AnalyticsError::DivisionUndefined {
            quantity: "average duration",
        });
    }
    let nanos = total.as_nanos() / count as u128;
    Ok(Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX)))
}

/// Fold every suite run into a [`Metrics`] snapshot.
pub fn aggregate(suites: &[TestSuiteResult]) -> Metrics {
    let mut total_tests = 0usize;
    let mut passed_tests = 0usize;
    let mut failed_tests = 0usize;
    let mut skipped_tests = 0usize;
    let mut total_duration = Duration::ZERO;
    let mut category_stats: BTreeMap<String, StatusCounts> = BTreeMap::new();
    let mut package_stats: BTreeMap<String, StatusCounts> = BTreeMap::new();

    for suite in suites {
        if !suite.is_consistent() {
            tracing::warn!(
                suite = %suite.suite_name,
                total = suite.total_tests,
                passed = suite.passed_tests,
                failed = suite.failed_tests,
                skipped = suite.skipped_tests,
                "suite counters do not add up; aggregating stored counters as-is"
            );
        }
        total_tests = total_tests.saturating_add(suite.total_tests);
        passed_tests = passed_tests.saturating_add(suite.passed_tests);
        failed_tests = failed_tests.saturating_add(suite.failed_tests);
        skipped_tests = skipped_tests.saturating_add(suite.skipped_tests);
        total_duration = total_duration.saturating_add(suite.duration);

        for result in &suite.results {
            tally(&mut category_stats, &result.category, result);
            tally(&mut package_stats, &result.package, result);
        }
    }

    tracing::debug!(
        suites = suites.len(),
        tests = total_tests,
        categories = category_stats.len(),
        packages = package_stats.len(),
        "aggregated metrics"
    );

    Metrics {
        total_suites: suites.len(),
        total_tests,
        passed_tests,
        failed_tests,
        skipped_tests,
        pass_rate: pass_rate(passed_tests, total_tests).ok(),
        total_duration,
        avg_duration: average_duration(total_duration, suites.len()).ok(),
        category_stats,
        package_stats,
    }
}

fn tally(stats: &mut BTreeMap<String, StatusCounts>, key: &str, result: &TestResult) {
    stats
        .entry(key.to_string())
        .or_default()
        .record(result.status);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    fn ts(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    fn suite(name: &str, results: Vec<TestResult>, secs: i64) -> TestSuiteResult {
        TestSuiteResult::from_results(name, "dev", "us-east-1", ts(0), ts(secs), results)
    }

    #[test]
    fn test_empty_collection_has_undefined_rates() {
        let m = aggregate(&[]);
        assert_eq!(m.total_suites, 0);
        assert_eq!(m.total_tests, 0);
        assert_eq!(m.pass_rate, None);
        assert_eq!(m.avg_duration, None);
        assert!(m.category_stats.is_empty());

        let v = serde_json::to_value(&m).unwrap();
        assert!(v["pass_rate"].is_null());
        assert!(v["avg_duration"].is_null());
    }

    #[test]
    fn test_pass_rate_bounds() {
        assert_eq!(pass_rate(7, 7).unwrap(), 100.0);
        assert_eq!(pass_rate(0, 7).unwrap(), 0.0);
        assert!(matches!(
            pass_rate(0, 0),
            Err(AnalyticsError::DivisionUndefined { .. })
        ));
        assert!(matches!(
            average_duration(Duration::from_secs(3), 0),
            Err(AnalyticsError::DivisionUndefined { .. })
        ));
        assert_eq!(
            average_duration(Duration::from_secs(3), 2).unwrap(),
            Duration::from_millis(1500)
        );
    }

    #[test]
    fn test_breakdowns_by_category_and_package() {
        let a = suite(
            "unit",
            vec![
                TestResult::pass("t1", "network", ts(0)).with_category("unit"),
                TestResult::fail("t2", "network", ts(0), "boom").with_category("chaos"),
            ],
            10,
        );
        let b = suite(
            "chaos",
            vec![
                TestResult::skip("t3", "firewall", ts(0)).with_category("chaos"),
                TestResult::pass("t4", "network", ts(0)).with_category("chaos"),
            ],
            20,
        );
        let m = aggregate(&[a, b]);

        assert_eq!(m.total_suites, 2);
        assert_eq!(m.total_tests, 4);
        assert_eq!(m.pass_rate, Some(50.0));
        assert_eq!(m.total_duration, Duration::from_secs(30));
        assert_eq!(m.avg_duration, Some(Duration::from_secs(15)));

        let chaos = m.category_stats["chaos"];
        assert_eq!(
            chaos,
            StatusCounts {
                total: 3,
                passed: 1,
                failed: 1,
                skipped: 1
            }
        );
        assert_eq!(m.package_stats["network"].total, 3);
        assert_eq!(m.package_stats["firewall"].get("skipped"), Some(1));
        assert_eq!(m.package_stats["firewall"].get("bogus"), None);
    }

    #[test]
    fn test_totals_come_from_counters_not_results() {
        let mut s = suite(
            "partial",
            vec![TestResult::pass("only", "pkg", ts(0)).with_category("unit")],
            1,
        );
        // Producer reported more tests than it attached.
        s.total_tests = 10;
        s.passed_tests = 4;
        s.failed_tests = 1;
        s.skipped_tests = 0;

        let m = aggregate(&[s]);
        assert_eq!(m.total_tests, 10);
        assert_eq!(m.passed_tests, 4);
        assert_eq!(m.pass_rate, Some(40.0));
        assert_eq!(m.category_stats["unit"].total, 1);
    }
}
