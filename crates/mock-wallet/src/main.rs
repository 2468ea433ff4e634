//! Mock wallet binary.

use std::net::SocketAddr;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use mock_wallet::{spawn, MockWalletConfig};

#[derive(Parser)]
#[command(name = "mock-wallet")]
#[command(about = "JSON-RPC wallet simulator for the auction house client")]
struct Cli {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:8546")]
    listen: SocketAddr,

    /// Accounts handed out per connection (comma-separated)
    #[arg(long, value_delimiter = ',')]
    accounts: Vec<String>,

    /// Decline every signature request
    #[arg(long)]
    reject_signatures: bool,

    /// Decline every connection request
    #[arg(long)]
    reject_connections: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("mock_wallet=info".parse()?)
                .add_directive("jsonrpsee=warn".parse()?),
        )
        .init();

    let cli = Cli::parse();

    let mut config = MockWalletConfig {
        reject_signatures: cli.reject_signatures,
        reject_connections: cli.reject_connections,
        ..Default::default()
    };
    if !cli.accounts.is_empty() {
        config.accounts = cli.accounts;
    }

    let (addr, handle) = spawn(cli.listen, config).await?;
    info!("Mock wallet running on {}. Press Ctrl+C to stop.", addr);

    tokio::signal::ctrl_c().await?;

    info!("Shutting down...");
    handle.stop()?;
    handle.stopped().await;

    Ok(())
}
