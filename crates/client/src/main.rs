//! CLI that pairs with a wallet and signs auction bids.
//!
//! The binary connects to a wallet over JSON-RPC, then signs a bid every time
//! the wallet's provider reports it is ready. Bids are kept in memory and
//! printed as they accumulate.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};

use auction_house_client::{
    sdk_factory, BidSession, ConnectionOptions, ModalHooks, RpcWalletSdk, TerminalModals,
};

#[derive(Parser)]
#[command(name = "auction-house")]
#[command(about = "Sign auction bids with a connected wallet")]
struct Cli {
    /// Wallet JSON-RPC endpoint
    #[arg(long, default_value = "http://127.0.0.1:8546")]
    wallet_rpc: String,

    /// JSON file with connection options
    #[arg(long)]
    options: Option<PathBuf>,

    /// Start a new connection process after every signed bid
    #[arg(long)]
    reconnect_after_bid: bool,
}

fn init_tracing(sdk_logging: bool) -> Result<()> {
    let sdk_level = if sdk_logging { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("auction_house=info".parse()?)
                .add_directive(format!("auction_house_client={}", sdk_level).parse()?)
                .add_directive("jsonrpsee=warn".parse()?),
        )
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let options = match &cli.options {
        Some(path) => ConnectionOptions::load(path)?,
        None => ConnectionOptions::default(),
    };
    init_tracing(options.logging.sdk)?;

    let endpoint = cli.wallet_rpc.clone();
    let hooks: Arc<dyn ModalHooks> = Arc::new(TerminalModals);
    let factory = sdk_factory(move |options| {
        RpcWalletSdk::new(&endpoint, options.clone(), hooks.clone())
    });

    let mut session =
        BidSession::new(options, factory)?.with_reconnect_after_bid(cli.reconnect_after_bid);

    if let Err(err) = session.start().await {
        error!(%err, "Wallet connection failed");
        return Ok(());
    }

    tokio::select! {
        result = session.run() => {
            if let Err(err) = result {
                error!(%err, "Bid session stopped");
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutting down...");
        }
    }

    info!(bids = session.bid_history().len(), "Session finished");
    Ok(())
}
