//! Query command arguments.

use clap::{Parser, Subcommand};

use super::{ConfigArgs, InputArgs};

#[derive(Parser, Clone)]
pub struct QueryArgs {
    #[command(subcommand)]
    pub cmd: QuerySub,
}

#[derive(Subcommand, Clone)]
pub enum QuerySub {
    /// Every FAIL result, in suite then execution order
    Failed(QueryInputArgs),
    /// Results slower than a threshold
    Slow(SlowArgs),
    /// Distinct categories, sorted
    Categories(QueryInputArgs),
    /// Distinct packages, sorted
    Packages(QueryInputArgs),
}

#[derive(clap::Args, Debug, Clone)]
pub struct QueryInputArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Print JSON instead of text lines
    #[arg(long)]
    pub json: bool,
}

#[derive(clap::Args, Debug, Clone)]
pub struct SlowArgs {
    #[command(flatten)]
    pub query: QueryInputArgs,

    #[command(flatten)]
    pub config: ConfigArgs,

    /// Strict lower bound, e.g. 500ms, 2s, 1m 30s (default: slow_threshold from config)
    #[arg(long)]
    pub threshold: Option<String>,
}
