//! The analytics collection: the append-only root every view is derived from.
//!
//! Nothing is cached. Each call to [`Analytics::metrics`], [`Analytics::trend`] or
//! [`Analytics::generate_report`] re-derives its output from the current contents.

use crate::aggregate::{self, Metrics};
use crate::errors::AnalyticsResult;
use crate::model::{TestResult, TestSuiteResult};
use crate::query;
use crate::report::{self, ReportFormat};
use crate::trend::{self, TrendAnalysis};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Analytics {
    results: Vec<TestSuiteResult>,
}

impl Analytics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one suite run. Runs keep their append order.
    pub fn add_result(&mut self, result: TestSuiteResult) {
        tracing::debug!(
            suite = %result.suite_name,
            environment = %result.environment,
            tests = result.total_tests,
            "added suite result"
        );
        self.results.push(result);
    }

    pub fn results(&self) -> &[TestSuiteResult] {
        &self.results
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn metrics(&self) -> Metrics {
        aggregate::aggregate(&self.results)
    }

    pub fn trend(&self) -> AnalyticsResult<TrendAnalysis> {
        trend::analyze(&self.results)
    }

    /// Render by format name (`json`, `html`, `markdown`, `junit`).
    pub fn generate_report(&self, format: &str) -> AnalyticsResult<String> {
        self.render(format.parse()?)
    }

    pub fn render(&self, format: ReportFormat) -> AnalyticsResult<String> {
        report::render(format, self)
    }

    pub fn failed_tests(&self) -> Vec<&TestResult> {
        query::failed_tests(&self.results)
    }

    pub fn slow_tests(&self, threshold: Duration) -> Vec<&TestResult> {
        query::slow_tests(&self.results, threshold)
    }

    pub fn categories(&self) -> Vec<&str> {
        query::categories(&self.results)
    }

    pub fn packages(&self) -> Vec<&str> {
        query::packages(&self.results)
    }
}

impl Extend<TestSuiteResult> for Analytics {
    fn extend<I: IntoIterator<Item = TestSuiteResult>>(&mut self, iter: I) {
        for result in iter {
            self.add_result(result);
        }
    }
}

impl FromIterator<TestSuiteResult> for Analytics {
    fn from_iter<I: IntoIterator<Item = TestSuiteResult>>(iter: I) -> Self {
        let mut analytics = Self::new();
        analytics.extend(iter);
        analytics
    }
}
