use std::path::{Path, PathBuf};

use futures::future::try_join_all;
use tally_core::{ingest, Analytics, AnalyticsError, AnalyticsResult, ReportConfig};

use crate::cli::args::{ConfigArgs, InputArgs};

/// Read every input concurrently and append the runs in argument order.
pub async fn load_analytics(input: &InputArgs) -> AnalyticsResult<Analytics> {
    let loaded = try_join_all(input.inputs.iter().map(|p| load_one(p.clone()))).await?;
    let analytics: Analytics = loaded.into_iter().flatten().collect();
    tracing::info!(
        files = input.inputs.len(),
        runs = analytics.len(),
        "loaded test runs"
    );
    Ok(analytics)
}

async fn load_one(path: PathBuf) -> AnalyticsResult<Vec<tally_core::TestSuiteResult>> {
    let content = tokio::fs::read_to_string(&path)
        .await
        .map_err(|e| AnalyticsError::Read {
            path: path.clone(),
            source: e,
        })?;
    ingest::parse_suites(&path, &content)
}

/// Defaults, then the config file if given, then `TALLY_*` environment overrides.
/// Command-line flags are applied by the caller.
pub fn load_config(args: &ConfigArgs) -> AnalyticsResult<ReportConfig> {
    let base = match args.config.as_deref() {
        Some(path) => ReportConfig::load(path)?,
        None => ReportConfig::default(),
    };
    base.with_env_overrides()
}

pub fn write_or_print(out: Option<&Path>, content: &str) -> AnalyticsResult<()> {
    match out {
        Some(path) => {
            std::fs::write(path, content).map_err(|e| AnalyticsError::Write {
                path: path.to_path_buf(),
                source: e,
            })?;
            tracing::info!(path = %path.display(), bytes = content.len(), "wrote report");
        }
        None => {
            print!("{content}");
            if !content.ends_with('\n') {
                println!();
            }
        }
    }
    Ok(())
}
