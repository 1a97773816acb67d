//! Employee API entry point.

use clap::Parser;

use employee_api::cli::{Cli, Commands};
use employee_api::commands;
use employee_api::Config;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::from_env();

    let result = match cli.command {
        Commands::Serve(args) => commands::serve::execute(args, config).await,
        Commands::Migrate(args) => commands::migrate::execute(args, config).await,
    };

    if let Err(err) = result {
        tracing::error!("Command failed: {}", err);
        std::process::exit(1);
    }
}

/// `--verbose` wins over RUST_LOG; otherwise RUST_LOG wins over the
/// "info" default.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
