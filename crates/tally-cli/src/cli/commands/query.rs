use std::time::Duration;

use serde::Serialize;
use tally_core::{AnalyticsError, TestResult};

use super::common::{load_analytics, load_config};
use crate::cli::args::{QueryInputArgs, SlowArgs};
use crate::exit_codes::EXIT_SUCCESS;

pub async fn cmd_failed(args: QueryInputArgs) -> anyhow::Result<i32> {
    let analytics = load_analytics(&args.input).await?;
    print_results(&analytics.failed_tests(), args.json)?;
    Ok(EXIT_SUCCESS)
}

pub async fn cmd_slow(args: SlowArgs) -> anyhow::Result<i32> {
    let threshold = match &args.threshold {
        Some(raw) => parse_threshold(raw)?,
        None => load_config(&args.config)?.slow_threshold,
    };
    let analytics = load_analytics(&args.query.input).await?;
    let slow = analytics.slow_tests(threshold);
    tracing::debug!(threshold = ?threshold, matched = slow.len(), "slow test query");
    print_results(&slow, args.query.json)?;
    Ok(EXIT_SUCCESS)
}

pub async fn cmd_categories(args: QueryInputArgs) -> anyhow::Result<i32> {
    let analytics = load_analytics(&args.input).await?;
    print_names(&analytics.categories(), args.json)?;
    Ok(EXIT_SUCCESS)
}

pub async fn cmd_packages(args: QueryInputArgs) -> anyhow::Result<i32> {
    let analytics = load_analytics(&args.input).await?;
    print_names(&analytics.packages(), args.json)?;
    Ok(EXIT_SUCCESS)
}

fn parse_threshold(raw: &str) -> Result<Duration, AnalyticsError> {
    humantime::parse_duration(raw).map_err(|e| AnalyticsError::Config {
        message: format!("--threshold {raw}: {e}"),
    })
}

fn print_results(results: &[&TestResult], json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(results)?);
        return Ok(());
    }
    for r in results {
        let mut line = format!(
            "{}\t{}\t{}\t{}",
            r.package,
            r.name,
            r.status,
            humantime::format_duration(r.duration)
        );
        if !r.error_text().is_empty() {
            line.push('\t');
            line.push_str(&r.error_text().replace('\n', " "));
        }
        println!("{line}");
    }
    Ok(())
}

fn print_names<T: Serialize + std::fmt::Display>(names: &[T], json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string(names)?);
    } else {
        for name in names {
            println!("{name}");
        }
    }
    Ok(())
}
