use super::common::{load_analytics, load_config};
use crate::cli::args::ExportArgs;
use crate::exit_codes::EXIT_SUCCESS;
use tally_core::{config::parse_formats, Exporter};

pub async fn run(args: ExportArgs) -> anyhow::Result<i32> {
    let mut config = load_config(&args.config)?;
    if let Some(dir) = args.reports_dir {
        config.reports_dir = dir;
    }
    if let Some(name) = args.name {
        config.base_name = name;
    }
    if !args.format.is_empty() {
        config.formats = parse_formats(&args.format.join(","))?;
    }

    let analytics = load_analytics(&args.input).await?;
    let exporter = Exporter::new(config.reports_dir.clone());
    let written = exporter.export_all(&analytics, &config.base_name, &config.formats)?;
    for report in &written {
        println!("{}\t{}", report.path.display(), report.sha256);
    }
    Ok(EXIT_SUCCESS)
}
