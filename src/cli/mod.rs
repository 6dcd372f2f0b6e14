//! Command-line interface - argument parsing and dispatch.
//!
//! Each entity gets a subcommand group. Handlers drive the same screens a
//! graphical front end would, then print the screen's state and feedback.

/// Subcommand groups and their handlers
pub mod commands;
/// Confirmation prompt on stdin
pub mod prompt;
/// Tables, amounts, dates, and feedback output
pub mod render;

use crate::{
    client::{ApiClient, SalesApi},
    config::{AppConfig, ClientProfile, Overrides},
    errors::Result,
};
use clap::{ArgAction, Parser, Subcommand};
use commands::{
    barang::BarangCommand, item::ItemCommand, pelanggan::PelangganCommand,
    penjualan::PenjualanCommand,
};
use std::path::PathBuf;
use tracing::debug;

#[derive(Debug, Parser)]
#[command(
    name = "sales-buddy",
    about = "Kelola barang, pelanggan, dan penjualan melalui sales API",
    version
)]
pub struct Cli {
    #[arg(long, global = true, help = "Base URL of the sales API (without /api)")]
    pub api_url: Option<String>,
    #[arg(long, global = true, value_enum, help = "Transport profile to use")]
    pub profile: Option<ClientProfile>,
    #[arg(long, global = true, help = "Request timeout in seconds")]
    pub timeout_secs: Option<u64>,
    #[arg(long, global = true, help = "Path to a sales-buddy.toml file")]
    pub config: Option<PathBuf>,
    #[arg(
        long,
        global = true,
        action = ArgAction::SetTrue,
        help = "Render command output as pretty JSON"
    )]
    pub json: bool,
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Flags that override the configuration file and environment.
    #[must_use]
    pub fn overrides(&self) -> Overrides {
        Overrides {
            base_url: self.api_url.clone(),
            profile: self.profile,
            timeout_secs: self.timeout_secs,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Products
    #[command(subcommand)]
    Barang(BarangCommand),
    /// Customers
    #[command(subcommand)]
    Pelanggan(PelangganCommand),
    /// Sales
    #[command(subcommand)]
    Penjualan(PenjualanCommand),
    /// Line items of a sale
    #[command(subcommand)]
    Item(ItemCommand),
}

/// What every handler needs: the API and the output settings.
#[derive(Clone, Debug)]
pub struct CliContext<A> {
    /// Client every command talks through
    pub api: A,
    /// Print results as JSON instead of tables
    pub json: bool,
    /// Page size used when `--page` is given without `--limit`
    pub page_limit: Option<u32>,
}

/// Builds the HTTP client from `config` and runs the parsed command.
///
/// Returns whether the action succeeded; failures have already been printed.
///
/// # Errors
/// Returns an error when the client cannot be built or output cannot be written.
pub async fn execute(cli: Cli, config: &AppConfig) -> Result<bool> {
    let context = CliContext {
        api: ApiClient::new(&config.api)?,
        json: cli.json,
        page_limit: config.api.page_limit,
    };
    run(&context, cli.command).await
}

/// Dispatches a command to its handler.
///
/// # Errors
/// Returns an error only for failures outside the screen cycle, such as JSON output.
pub async fn run<A: SalesApi + Clone>(context: &CliContext<A>, command: Commands) -> Result<bool> {
    debug!(?command, "Dispatching command");
    match command {
        Commands::Barang(command) => commands::barang::handle(context, command).await,
        Commands::Pelanggan(command) => commands::pelanggan::handle(context, command).await,
        Commands::Penjualan(command) => commands::penjualan::handle(context, command).await,
        Commands::Item(command) => commands::item::handle(context, command).await,
    }
}
