//! Bid session driver.
//!
//! Owns the wallet SDK, the table of connected wallets and the bid history.
//! After a successful handshake it subscribes to provider events and, for each
//! `Initialized` event, signs a new bid for the connected account.

use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};

use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::{debug, error, info, warn};

use auction_house_types::{
    bid_amount_for, create_bid, BidRecord, DEFAULT_ITEM_ID, MAX_WALLET_CONNECTIONS,
};

use crate::config::ConnectionOptions;
use crate::error::SessionError;
use crate::provider::{sign_typed_data_v4, ProviderEvent, WalletProvider};
use crate::sdk::{SdkFactory, WalletSdk};
use crate::sink::{BidSink, DiscardSink};

/// Connection lifecycle of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No handshake has completed yet
    AwaitingConnection,
    /// Connected, waiting for provider-ready events
    Connected,
}

/// What a provider-ready event resulted in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadyOutcome {
    /// The connection reported no accounts
    NoAccount,
    /// Too many distinct wallets have connected
    CapacityReached,
    /// A bid was signed and recorded
    BidPlaced(BidRecord),
}

struct ActiveConnection<P> {
    accounts: Vec<String>,
    provider: P,
    events: UnboundedReceiver<ProviderEvent>,
}

/// Drives wallet connection and bid signing.
pub struct BidSession<S: WalletSdk> {
    options: ConnectionOptions,
    factory: SdkFactory<S>,
    sdk: S,
    connection: Option<ActiveConnection<S::Provider>>,
    /// Connection count per wallet address
    connected_wallets: HashMap<String, u32>,
    bid_history: Vec<BidRecord>,
    sink: Box<dyn BidSink>,
    reconnect_after_bid: bool,
}

impl<S: WalletSdk> BidSession<S> {
    /// Create a session, building the first SDK instance from `options`.
    pub fn new(options: ConnectionOptions, factory: SdkFactory<S>) -> Result<Self, SessionError> {
        let sdk = factory(&options).map_err(SessionError::Connect)?;
        Ok(Self {
            options,
            factory,
            sdk,
            connection: None,
            connected_wallets: HashMap::new(),
            bid_history: Vec::new(),
            sink: Box::new(DiscardSink),
            reconnect_after_bid: false,
        })
    }

    /// Forward signed bids to `sink` in addition to the in-memory history.
    pub fn with_sink(mut self, sink: Box<dyn BidSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Restart the connection process after every placed bid.
    pub fn with_reconnect_after_bid(mut self, enabled: bool) -> Self {
        self.reconnect_after_bid = enabled;
        self
    }

    pub fn state(&self) -> SessionState {
        if self.connection.is_some() {
            SessionState::Connected
        } else {
            SessionState::AwaitingConnection
        }
    }

    pub fn bid_history(&self) -> &[BidRecord] {
        &self.bid_history
    }

    pub fn connected_wallets(&self) -> &HashMap<String, u32> {
        &self.connected_wallets
    }

    pub fn options(&self) -> &ConnectionOptions {
        &self.options
    }

    /// Accounts returned by the current connection.
    pub fn accounts(&self) -> Option<&[String]> {
        self.connection.as_ref().map(|c| c.accounts.as_slice())
    }

    /// Connect to the wallet and subscribe to provider events.
    pub async fn start(&mut self) -> Result<Vec<String>, SessionError> {
        debug!(app = %self.options.dapp_metadata.name, "Auction house instance");

        let accounts = self.sdk.connect().await.map_err(SessionError::Connect)?;
        info!(?accounts, "connect request accounts");

        let provider = self.sdk.provider();
        let (tx, rx) = mpsc::unbounded_channel();
        provider.subscribe(tx);

        self.connection = Some(ActiveConnection {
            accounts: accounts.clone(),
            provider,
            events: rx,
        });
        Ok(accounts)
    }

    /// Discard the SDK, build a fresh one from the same options and connect again.
    pub async fn start_new_connection_process(&mut self) -> Result<Vec<String>, SessionError> {
        info!("Starting a new connection process...");

        self.connection = None;
        self.sdk = (self.factory)(&self.options).map_err(SessionError::Connect)?;
        self.start().await
    }

    /// Process provider events until the wallet disconnects.
    ///
    /// Failures inside the provider-ready handler are logged and do not stop
    /// the loop.
    pub async fn run(&mut self) -> Result<(), SessionError> {
        loop {
            let event = self
                .connection
                .as_mut()
                .ok_or(SessionError::NotConnected)?
                .events
                .recv()
                .await;

            match event {
                Some(ProviderEvent::Initialized) => match self.on_provider_ready().await {
                    Ok(ReadyOutcome::BidPlaced(_)) if self.reconnect_after_bid => {
                        self.start_new_connection_process().await?;
                    }
                    Ok(outcome) => debug!(?outcome, "Provider-ready event handled"),
                    Err(err) => error!(%err, "Provider-ready handler failed"),
                },
                Some(ProviderEvent::Disconnected) | None => {
                    info!("Wallet provider disconnected");
                    self.connection = None;
                    return Ok(());
                }
            }
        }
    }

    /// Handle a provider-ready event for the current connection.
    pub async fn on_provider_ready(&mut self) -> Result<ReadyOutcome, SessionError> {
        let (provider, accounts) = {
            let connection = self.connection.as_ref().ok_or(SessionError::NotConnected)?;
            (connection.provider.clone(), connection.accounts.clone())
        };
        self.handle_provider_ready(&provider, &accounts).await
    }

    /// Register the first account, then sign and record a bid for it.
    ///
    /// The wallet's count is incremented before the capacity check, so a wallet
    /// that arrives after the cap is still entered into the table. Once more
    /// than [`MAX_WALLET_CONNECTIONS`] distinct wallets are known, no wallet can
    /// bid again, including ones onboarded earlier.
    pub async fn handle_provider_ready<P: WalletProvider>(
        &mut self,
        provider: &P,
        accounts: &[String],
    ) -> Result<ReadyOutcome, SessionError> {
        let Some(from) = accounts.first() else {
            debug!("Provider ready without accounts");
            return Ok(ReadyOutcome::NoAccount);
        };

        let count = {
            let entry = self.connected_wallets.entry(from.clone()).or_insert(0);
            *entry += 1;
            *entry
        };

        if self.connected_wallets.len() > MAX_WALLET_CONNECTIONS {
            info!("Maximum number of different wallet connections reached.");
            return Ok(ReadyOutcome::CapacityReached);
        }

        let item_id = DEFAULT_ITEM_ID;
        let bid_amount = bid_amount_for(count);
        let typed_data = create_bid(from, item_id, bid_amount);

        let signature = sign_typed_data_v4(provider, from, &typed_data).await?;
        info!(%signature, "sign response");

        let record = BidRecord {
            from: from.clone(),
            item_id,
            bid_amount,
            signature,
            timestamp: unix_millis(),
        };
        self.bid_history.push(record.clone());

        if let Err(err) = self.sink.submit(&record).await {
            warn!(%err, "Failed to forward bid");
        }

        info!(
            "Bid history: {}",
            serde_json::to_string_pretty(&self.bid_history)?
        );
        Ok(ReadyOutcome::BidPlaced(record))
    }
}

fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
