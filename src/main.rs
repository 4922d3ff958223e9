use std::process::ExitCode;

use clap::Parser;
use tenant_spinner::adapter::inbound::cli::command::Cli;
use tenant_spinner::adapter::inbound::cli::diagnostic::CommandError;
use tenant_spinner::adapter::inbound::cli::output::{self, OutputConfig};
use tenant_spinner::adapter::inbound::cli::run;

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    output::configure(OutputConfig::new(cli.json, cli.quiet));

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if output::is_json() {
                output::error(&err.to_string());
            } else {
                eprintln!("{:?}", miette::Report::new(CommandError::from(err)));
            }
            ExitCode::FAILURE
        }
    }
}
