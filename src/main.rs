use clap::Parser;
use colored::Colorize;
use std::process::ExitCode;

mod cli;

use cli::dispatch::dispatch;
use cli::types::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();
    twig::logging::init(cli.verbose);

    match dispatch(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err:#}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}
