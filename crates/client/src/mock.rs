//! In-memory wallet SDK for tests and offline demos.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use tokio::sync::mpsc::UnboundedSender;

use auction_house_types::wallet_rpc::SIGN_TYPED_DATA_V4;

use crate::error::WalletError;
use crate::provider::{EventListeners, ProviderEvent, WalletProvider};
use crate::sdk::WalletSdk;

#[derive(Debug, Default)]
struct MockProviderState {
    requests: Vec<(String, Vec<Value>)>,
    reject_signatures: bool,
    signatures_issued: usize,
}

/// Provider that signs with deterministic placeholder values.
#[derive(Debug, Clone, Default)]
pub struct MockProvider {
    state: Arc<Mutex<MockProviderState>>,
    listeners: Arc<EventListeners>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent signature requests fail as if the user declined them.
    pub fn set_reject_signatures(&self, reject: bool) {
        self.state.lock().reject_signatures = reject;
    }

    /// Fire an event at all subscribers.
    pub fn emit(&self, event: ProviderEvent) {
        self.listeners.emit(event);
    }

    /// Every request received so far, in order.
    pub fn requests(&self) -> Vec<(String, Vec<Value>)> {
        self.state.lock().requests.clone()
    }

    /// Signature returned for the `n`th accepted request (1-based).
    pub fn signature(n: usize) -> String {
        format!("0x{:0130x}", n)
    }
}

#[async_trait]
impl WalletProvider for MockProvider {
    async fn request(&self, method: &str, params: Vec<Value>) -> Result<Value, WalletError> {
        let mut state = self.state.lock();
        state.requests.push((method.to_string(), params));

        if method != SIGN_TYPED_DATA_V4 {
            return Err(WalletError::Rpc {
                code: -32601,
                message: format!("Method not found: {}", method),
            });
        }
        if state.reject_signatures {
            return Err(WalletError::UserRejected);
        }

        state.signatures_issued += 1;
        Ok(Value::String(Self::signature(state.signatures_issued)))
    }

    fn subscribe(&self, listener: UnboundedSender<ProviderEvent>) {
        self.listeners.subscribe(listener);
    }
}

/// SDK that connects instantly with a fixed account list.
#[derive(Debug, Clone)]
pub struct MockWalletSdk {
    accounts: Vec<String>,
    connect_error: Option<WalletError>,
    provider: MockProvider,
}

impl MockWalletSdk {
    pub fn new(accounts: Vec<String>) -> Self {
        Self {
            accounts,
            connect_error: None,
            provider: MockProvider::new(),
        }
    }

    /// Fail every handshake with `err`.
    pub fn failing(mut self, err: WalletError) -> Self {
        self.connect_error = Some(err);
        self
    }

    /// Share an existing provider, e.g. across SDK instances built by a factory.
    pub fn with_provider(mut self, provider: MockProvider) -> Self {
        self.provider = provider;
        self
    }
}

#[async_trait]
impl WalletSdk for MockWalletSdk {
    type Provider = MockProvider;

    async fn connect(&mut self) -> Result<Vec<String>, WalletError> {
        if let Some(err) = &self.connect_error {
            return Err(err.clone());
        }
        self.provider.listeners.mark_initialized();
        Ok(self.accounts.clone())
    }

    fn provider(&self) -> MockProvider {
        self.provider.clone()
    }
}
