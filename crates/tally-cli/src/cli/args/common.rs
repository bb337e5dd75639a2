//! Shared argument types used across multiple commands.

use std::path::PathBuf;

#[derive(clap::Args, Debug, Clone)]
pub struct InputArgs {
    /// Suite result files: a suite object, an array of suites, a JSON report, or JSONL.
    /// Runs are appended in argument order.
    #[arg(required = true, value_name = "FILE")]
    pub inputs: Vec<PathBuf>,
}

#[derive(clap::Args, Debug, Clone)]
pub struct ConfigArgs {
    /// YAML report config (reports_dir, base_name, formats, slow_threshold)
    #[arg(long, env = "TALLY_CONFIG")]
    pub config: Option<PathBuf>,
}
