use clap::Parser;

mod cli;
pub mod exit_codes;

use cli::args::Cli;
use cli::commands::dispatch;
use tally_core::AnalyticsError;

#[tokio::main(flavor = "multi_thread")]
async fn main() {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }
    env_logger::init();
    let cli = Cli::parse();
    let code = match dispatch(cli).await {
        Ok(code) => code,
        Err(e) => match e.downcast_ref::<AnalyticsError>() {
            Some(err) => {
                eprintln!("error: {e:#}");
                err.exit_code()
            }
            None => {
                eprintln!("fatal: {e:?}");
                exit_codes::EXIT_FATAL
            }
        },
    };
    std::process::exit(code);
}
