use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod common;
pub mod query;
pub use common::*;
pub use query::*;

#[derive(Parser)]
#[command(
    name = "tally",
    version,
    about = "Test-suite analytics: metrics, trends and JSON/HTML/Markdown/JUnit reports from suite results"
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Render one report to stdout or a file
    Report(ReportArgs),
    /// Write timestamped reports under the reports directory
    Export(ExportArgs),
    /// Print the aggregated metrics snapshot as JSON
    Metrics(InputArgs),
    /// Print the pass-rate and duration trend across runs as JSON
    Trend(TrendArgs),
    /// Filtered views over individual test results
    Query(QueryArgs),
    Version,
}

#[derive(clap::Args, Debug, Clone)]
pub struct ReportArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// json, html, markdown or junit
    #[arg(long, default_value = "markdown")]
    pub format: String,

    /// Write to this file instead of stdout
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(clap::Args, Debug, Clone)]
pub struct ExportArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub config: ConfigArgs,

    /// Reports directory (overrides config and TALLY_REPORTS_DIR)
    #[arg(long)]
    pub reports_dir: Option<PathBuf>,

    /// Base file name; a trailing .<format> is stripped
    #[arg(long)]
    pub name: Option<String>,

    /// Formats to export, comma separated (default: from config, else all)
    #[arg(long, value_delimiter = ',')]
    pub format: Vec<String>,
}

#[derive(clap::Args, Debug, Clone)]
pub struct TrendArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Exit with code 1 when the trend is regressing
    #[arg(long)]
    pub fail_on_regression: bool,
}
