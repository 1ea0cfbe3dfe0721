//! Planner CLI entry point.

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use planner_cli::cli::Cli;
use planner_cli::commands;

#[tokio::main]
async fn main() {
    // Load .env.local if it exists (PLANNER_* settings)
    let _ = dotenvy::from_filename(".env.local");

    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level().to_string()));

    fmt().with_env_filter(filter).with_target(false).init();

    let state_dir = cli.state_dir();

    if let Err(e) = commands::execute(cli.command, &state_dir).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
