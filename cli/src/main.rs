//! Polydock - inspect Lagoon app instances

use std::process::ExitCode;

use clap::Parser;
use polydock_lagoon::cli::Cli;
use polydock_lagoon::output::json;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let as_json = cli.json;
    match cli.run() {
        Ok(code) => code,
        Err(e) => {
            match json::format_error(&format!("{e:#}"), "command_failed") {
                Ok(body) if as_json => println!("{body}"),
                _ => eprintln!("Error: {e:#}"),
            }
            ExitCode::FAILURE
        }
    }
}
