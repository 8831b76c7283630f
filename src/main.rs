use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod mcp;

fn main() -> ExitCode {
    let args = cli::Cli::parse();
    setup_logging(args.debug);

    match cli::run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr; stdout carries the MCP stream.
fn setup_logging(debug: bool) {
    let default = if debug {
        "copilot_usage_mcp=debug"
    } else {
        "copilot_usage_mcp=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}
