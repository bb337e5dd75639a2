use super::common::{load_analytics, write_or_print};
use crate::cli::args::ReportArgs;
use crate::exit_codes::EXIT_SUCCESS;
use tally_core::ReportFormat;

pub async fn run(args: ReportArgs) -> anyhow::Result<i32> {
    // Reject the format before touching any input.
    let format: ReportFormat = args.format.parse()?;
    let analytics = load_analytics(&args.input).await?;
    let rendered = analytics.render(format)?;
    write_or_print(args.out.as_deref(), &rendered)?;
    Ok(EXIT_SUCCESS)
}
