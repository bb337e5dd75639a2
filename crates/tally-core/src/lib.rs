//! Test-suite analytics.
//!
//! Suite runs are appended to an [`Analytics`] collection; everything else is derived
//! from it on demand:
//!
//! - [`aggregate`]: totals, pass rate and per-category / per-package breakdowns
//! - [`trend`]: pass-rate and duration movement across runs ordered by start time
//! - [`report`]: JSON, HTML, Markdown and JUnit XML renderers
//! - [`export`]: timestamped report files under a reports directory
//! - [`query`]: failed tests, slow tests, distinct categories and packages
//!
//! ```
//! use chrono::Utc;
//! use tally_core::{Analytics, TestResult, TestSuiteResult};
//!
//! let now = Utc::now();
//! let mut analytics = Analytics::new();
//! analytics.add_result(TestSuiteResult::from_results(
//!     "network",
//!     "dev",
//!     "us-east-1",
//!     now,
//!     now,
//!     vec![TestResult::pass("vpc_cidr", "network", now).with_category("unit")],
//! ));
//!
//! assert_eq!(analytics.metrics().pass_rate, Some(100.0));
//! let md = analytics.generate_report("markdown").unwrap();
//! assert!(md.contains("| vpc_cidr | PASS |"));
//! ```

pub mod aggregate;
pub mod analytics;
pub mod config;
pub mod errors;
pub mod export;
pub mod ingest;
pub mod model;
pub mod query;
pub mod report;
pub mod trend;

pub use aggregate::{Metrics, StatusCounts};
pub use analytics::Analytics;
pub use config::ReportConfig;
pub use errors::{AnalyticsError, AnalyticsResult};
pub use export::{ExportedReport, Exporter};
pub use model::{CoverageInfo, PerfMetrics, TestResult, TestStatus, TestSuiteResult};
pub use report::ReportFormat;
pub use trend::TrendAnalysis;
