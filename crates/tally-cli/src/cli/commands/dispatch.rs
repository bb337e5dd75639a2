use super::super::args::*;
use crate::exit_codes::EXIT_SUCCESS;

pub async fn dispatch(cli: Cli) -> anyhow::Result<i32> {
    match cli.cmd {
        Command::Report(args) => super::report::run(args).await,
        Command::Export(args) => super::export::run(args).await,
        Command::Metrics(args) => super::metrics::run(args).await,
        Command::Trend(args) => super::trend::run(args).await,
        Command::Query(args) => match args.cmd {
            QuerySub::Failed(q) => super::query::cmd_failed(q).await,
            QuerySub::Slow(s) => super::query::cmd_slow(s).await,
            QuerySub::Categories(q) => super::query::cmd_categories(q).await,
            QuerySub::Packages(q) => super::query::cmd_packages(q).await,
        },
        Command::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(EXIT_SUCCESS)
        }
    }
}
