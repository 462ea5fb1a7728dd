use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod configuration;
mod console;
mod error;
mod model;
mod services;

use configuration::Configuration;
use console::cli::Cli;

fn setup_tracing_subscriber() {
    // Logs go to stderr so they never interleave with prompts on stdout.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            // Help and version are not errors.
            return if e.use_stderr() {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    setup_tracing_subscriber();

    let configuration = match Configuration::from_environment() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::from(1);
        }
    };

    match console::run(cli, configuration) {
        Ok(code) => code,
        Err(e) => {
            tracing::debug!("command failed: {e:?}");
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}
