use crate::commands::{
    run_catalog_export, run_catalog_search, CatalogExportArgs, CatalogSearchArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use univera::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "univera-api",
    about = "Serve the UniVera college and accommodation finder, or query a catalog snapshot offline",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Inspect a catalog snapshot without starting the server
    Catalog {
        #[command(subcommand)]
        command: CatalogCommand,
    },
}

#[derive(Subcommand, Debug)]
enum CatalogCommand {
    /// Filter and sort colleges the same way the listing screen does
    Search(CatalogSearchArgs),
    /// Export colleges as CSV
    Export(CatalogExportArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Catalog snapshot (JSON) used to seed the in-memory stores
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Catalog {
            command: CatalogCommand::Search(args),
        } => run_catalog_search(args),
        Command::Catalog {
            command: CatalogCommand::Export(args),
        } => run_catalog_export(args),
    }
}
