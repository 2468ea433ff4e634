//! Provider interface of a connected wallet.
//!
//! A provider answers JSON-RPC style requests and publishes lifecycle events.
//! Events are delivered over tokio channels instead of callbacks so the driver
//! can consume them in one sequential loop.

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use tokio::sync::mpsc::UnboundedSender;

use auction_house_types::{wallet_rpc::SIGN_TYPED_DATA_V4, TypedData};

use crate::error::{SessionError, WalletError};

/// Lifecycle notifications published by a provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderEvent {
    /// The provider finished initializing and accepts requests.
    Initialized,
    /// The wallet session ended.
    Disconnected,
}

/// Request/response and event interface of a connected wallet.
#[async_trait]
pub trait WalletProvider: Clone + Send + Sync + 'static {
    /// Send a request to the wallet. May suspend until the user responds.
    async fn request(&self, method: &str, params: Vec<Value>) -> Result<Value, WalletError>;

    /// Register a listener for provider events.
    ///
    /// A listener registered after initialization receives `Initialized` right away.
    fn subscribe(&self, listener: UnboundedSender<ProviderEvent>);
}

/// Ask the wallet for an `eth_signTypedData_v4` signature over `typed_data`.
pub async fn sign_typed_data_v4<P: WalletProvider>(
    provider: &P,
    from: &str,
    typed_data: &TypedData,
) -> Result<String, SessionError> {
    let params = vec![
        Value::String(from.to_string()),
        Value::String(typed_data.to_json()?),
    ];

    let response = provider
        .request(SIGN_TYPED_DATA_V4, params)
        .await
        .map_err(SessionError::Sign)?;

    match response {
        Value::String(signature) => Ok(signature),
        other => Err(SessionError::Sign(WalletError::UnexpectedResponse(format!(
            "expected signature string, got {}",
            other
        )))),
    }
}

#[derive(Debug, Default)]
struct ListenerState {
    senders: Vec<UnboundedSender<ProviderEvent>>,
    initialized: bool,
}

/// Registry of event listeners shared by provider implementations.
#[derive(Debug, Default)]
pub struct EventListeners {
    state: Mutex<ListenerState>,
}

impl EventListeners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener, replaying `Initialized` if it already fired.
    pub fn subscribe(&self, listener: UnboundedSender<ProviderEvent>) {
        let mut state = self.state.lock();
        if state.initialized && listener.send(ProviderEvent::Initialized).is_err() {
            return;
        }
        state.senders.push(listener);
    }

    /// Mark the provider initialized and notify current listeners.
    pub fn mark_initialized(&self) {
        let mut state = self.state.lock();
        state.initialized = true;
        state
            .senders
            .retain(|tx| tx.send(ProviderEvent::Initialized).is_ok());
    }

    /// Deliver an event to every live listener. Closed listeners are dropped.
    pub fn emit(&self, event: ProviderEvent) {
        self.state
            .lock()
            .senders
            .retain(|tx| tx.send(event.clone()).is_ok());
    }

    pub fn listener_count(&self) -> usize {
        self.state.lock().senders.len()
    }
}
