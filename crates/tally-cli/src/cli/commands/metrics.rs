use super::common::load_analytics;
use crate::cli::args::InputArgs;
use crate::exit_codes::EXIT_SUCCESS;

pub async fn run(args: InputArgs) -> anyhow::Result<i32> {
    let analytics = load_analytics(&args).await?;
    let metrics = analytics.metrics();
    println!("{}", serde_json::to_string_pretty(&metrics)?);
    Ok(EXIT_SUCCESS)
}
