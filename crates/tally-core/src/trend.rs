//! Trend analysis over a chronologically ordered sequence of suite runs.

use crate::errors::{AnalyticsError, AnalyticsResult};
use crate::model::TestSuiteResult;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Fewest suite runs a trend can be computed from.
pub const MIN_TREND_RUNS: usize = 2;

/// Pass-rate and duration movement between the first and last run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendAnalysis {
    /// Per-run pass rate in percent, oldest first.
    pub pass_rate_trend: Vec<f64>,
    /// Per-run duration, oldest first.
    #[serde(with = "crate::model::serde_duration::seq")]
    pub duration_trend: Vec<Duration>,
    /// Last pass rate minus first, in percentage points.
    pub pass_rate_change: f64,
    /// Last duration minus first, in seconds. Negative when the last run was faster.
    pub duration_change_secs: f64,
    /// Pass rate went up AND duration went down.
    pub improving: bool,
    /// Pass rate went down OR duration went up.
    pub regressing: bool,
}

impl TrendAnalysis {
    /// "regressing", "improving" or "stable". Regression wins when both signals disagree.
    pub fn direction(&self) -> &'static str {
        if self.regressing {
            "regressing"
        } else if self.improving {
            "improving"
        } else {
            "stable"
        }
    }
}

/// Compute the trend across `suites` ordered by start time.
///
/// The input is not reordered; runs sharing a start time keep their relative order.
pub fn analyze(suites: &[TestSuiteResult]) -> AnalyticsResult<TrendAnalysis> {
    if suites.len() < MIN_TREND_RUNS {
        return Err(AnalyticsError::InsufficientData {
            required: MIN_TREND_RUNS,
            actual: suites.len(),
        });
    }

    let mut ordered: Vec<&TestSuiteResult> = suites.iter().collect();
    ordered.sort_by_key(|s| s.start_time);

    let pass_rate_trend: Vec<f64> = ordered.iter().map(|s| s.pass_rate_or_zero()).collect();
    let duration_trend: Vec<Duration> = ordered.iter().map(|s| s.duration).collect();

    // len >= MIN_TREND_RUNS, so first/last exist
    let pass_rate_change = pass_rate_trend[pass_rate_trend.len() - 1] - pass_rate_trend[0];
    let duration_change_secs =
        signed_secs(duration_trend[0], duration_trend[duration_trend.len() - 1]);

    let improving = pass_rate_change > 0.0 && duration_change_secs < 0.0;
    let regressing = pass_rate_change < 0.0 || duration_change_secs > 0.0;

    tracing::debug!(
        runs = ordered.len(),
        pass_rate_change,
        duration_change_secs,
        improving,
        regressing,
        "computed trend"
    );

    Ok(TrendAnalysis {
        pass_rate_trend,
        duration_trend,
        pass_rate_change,
        duration_change_secs,
        improving,
        regressing,
    })
}

fn signed_secs(first: Duration, last: Duration) -> f64 {
    if last >= first {
        (last - first).as_secs_f64()
    } else {
        -(first - last).as_secs_f64()
    }
}
