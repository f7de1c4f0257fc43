//! RescueGrid CLI - Rescue robot fleet simulation
//!
//! Runs either process of the two-process system: the simulation engine
//! (`simulator`) or the aggregator service (`backend`).

use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser)]
#[command(name = "rescuegrid")]
#[command(version = "0.1.0")]
#[command(about = "Rescue robot fleet simulation and aggregator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the simulation engine process
    Simulator {
        /// Port for the engine HTTP surface
        #[arg(short, long, default_value = "8001")]
        port: u16,

        /// Random seed for world generation (defaults to OS entropy)
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Run the aggregator service
    Backend {
        /// Port for the aggregator HTTP surface
        #[arg(short, long, default_value = "8000")]
        port: u16,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();
    let cancel = CancellationToken::new();

    // Ctrl-C cancels the background tasks and drains the server
    let shutdown = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("shutdown requested");
            shutdown.cancel();
        }
    });

    match cli.command {
        Commands::Simulator { port, seed } => {
            let config = rescuegrid_config::SimulatorConfig::from_env()?;
            rescuegrid_simulator::run(config, port, seed, cancel).await
        }
        Commands::Backend { port } => {
            let config = rescuegrid_config::BackendConfig::from_env()?;
            rescuegrid_backend::run(config, port, cancel).await
        }
    }
}
