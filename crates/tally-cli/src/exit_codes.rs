//! Process exit codes for `tally`.
//! Library errors map through `AnalyticsError::exit_code`; these cover the rest.

pub const EXIT_SUCCESS: i32 = 0;
/// `trend --fail-on-regression` saw a regressing trend.
pub const EXIT_REGRESSION: i32 = 1;
/// Unexpected failure outside the analytics error taxonomy.
pub const EXIT_FATAL: i32 = 2;
