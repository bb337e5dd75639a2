use super::common::load_analytics;
use crate::cli::args::TrendArgs;
use crate::exit_codes::{EXIT_REGRESSION, EXIT_SUCCESS};

pub async fn run(args: TrendArgs) -> anyhow::Result<i32> {
    let analytics = load_analytics(&args.input).await?;
    let trend = analytics.trend()?;
    println!("{}", serde_json::to_string_pretty(&trend)?);

    if trend.regressing {
        tracing::warn!(
            pass_rate_change = trend.pass_rate_change,
            duration_change_secs = trend.duration_change_secs,
            "test runs are regressing"
        );
        if args.fail_on_regression {
            return Ok(EXIT_REGRESSION);
        }
    }
    Ok(EXIT_SUCCESS)
}
