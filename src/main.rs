use clap::{Parser, Subcommand};
use configuration::load_config;
use database::connection::{connect, run_migrations};
use std::net::SocketAddr;
use tracing_subscriber::EnvFilter;

/// The main entry point for the Classboard API service.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables (DATABASE_URL) from an optional .env file.
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve => {
            let config = load_config()?;
            let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);
            web_server::run_server(addr, config).await?;
        }
        Commands::Migrate => {
            let config = load_config()?;
            let pool = connect(&config.database).await?;
            run_migrations(&pool).await?;
            tracing::info!("Database migrations applied.");
        }
    }

    Ok(())
}

/// A small class/notice CRUD API with per-request transaction scoping
/// and a TTL read-through cache.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API server.
    Serve,
    /// Apply pending database migrations and exit.
    Migrate,
}
