use clap::Parser;
use std::process::ExitCode;
use vpc_cidr_blocks::config::Cli;
use vpc_cidr_blocks::{logging, run};

fn main() -> ExitCode {
    // Do as little as possible in main.rs as it can't contain any tests
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.log_level.map(Into::into), cli.log_config.as_deref()) {
        eprintln!("{e}");
        return ExitCode::from(2);
    }
    log::debug!("{cli:?}");

    match run(&cli) {
        Ok(report) => ExitCode::from(report.exit_code() as u8),
        Err(e) => {
            log::error!("{e}");
            ExitCode::from(2)
        }
    }
}
