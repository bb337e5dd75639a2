//! Filtered views over the individual results of a collection.

use crate::model::{TestResult, TestStatus, TestSuiteResult};
use std::collections::BTreeSet;
use std::time::Duration;

fn all_results(suites: &[TestSuiteResult]) -> impl Iterator<Item = &TestResult> {
    suites.iter().flat_map(|s| s.results.iter())
}

/// Every FAIL result, in suite order then execution order.
pub fn failed_tests(suites: &[TestSuiteResult]) -> Vec<&TestResult> {
    all_results(suites)
        .filter(|r| r.status == TestStatus::Fail)
        .collect()
}

/// Every result whose duration is strictly greater than `threshold`.
pub fn slow_tests(suites: &[TestSuiteResult], threshold: Duration) -> Vec<&TestResult> {
    all_results(suites)
        .filter(|r| r.duration > threshold)
        .collect()
}

/// Distinct categories, sorted.
pub fn categories(suites: &[TestSuiteResult]) -> Vec<&str> {
    distinct(all_results(suites).map(|r| r.category.as_str()))
}

/// Distinct packages, sorted.
pub fn packages(suites: &[TestSuiteResult]) -> Vec<&str> {
    distinct(all_results(suites).map(|r| r.package.as_str()))
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    values.collect::<BTreeSet<_>>().into_iter().collect()
}
