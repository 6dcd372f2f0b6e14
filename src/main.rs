use clap::Parser;
use dotenvy::dotenv;
use sales_buddy::{
    cli::{self, Cli},
    config,
    errors::Result,
};
use std::process::ExitCode;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // 1. Initialize tracing (as early as possible); stderr keeps stdout for command output
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    // 2. Load .env file; non-fatal, env vars can be set externally
    dotenv().ok();
    debug!("Attempted to load .env file.");

    // 3. Parse arguments and resolve configuration
    let cli = Cli::parse();
    let app_config = config::load_app_configuration(cli.config.as_deref(), &cli.overrides())
        .inspect_err(|e| error!("Failed to load configuration: {e}"))?;

    // 4. Run the command
    let succeeded = cli::execute(cli, &app_config)
        .await
        .inspect_err(|e| error!("Command failed: {e}"))?;

    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
