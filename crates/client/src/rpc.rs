//! Wallet SDK backed by a JSON-RPC wallet endpoint.
//!
//! The handshake has two steps: `wallet_requestConnection` returns a pairing
//! link and a one-time passcode which are handed to the modal hooks, then
//! `wallet_approveConnection` blocks until the user approves and returns the
//! authorized accounts.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use jsonrpsee::core::client::ClientT;
use jsonrpsee::core::ClientError;
use jsonrpsee::http_client::{HttpClient, HttpClientBuilder};
use serde_json::Value;
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

use auction_house_types::wallet_rpc::{
    ConnectionRequest, WalletStatus, UNAUTHORIZED_CODE, USER_REJECTED_CODE,
    WALLET_APPROVE_CONNECTION, WALLET_REQUEST_CONNECTION, WALLET_STATUS,
};

use crate::config::ConnectionOptions;
use crate::error::WalletError;
use crate::modals::ModalHooks;
use crate::provider::{EventListeners, ProviderEvent, WalletProvider};
use crate::sdk::WalletSdk;

/// Requests wait for a human in the wallet, so allow plenty of time.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(600);

fn map_client_error(err: ClientError) -> WalletError {
    match err {
        ClientError::Call(obj) => match obj.code() {
            USER_REJECTED_CODE => WalletError::UserRejected,
            UNAUTHORIZED_CODE => WalletError::Unauthorized(obj.message().to_string()),
            code => WalletError::Rpc {
                code,
                message: obj.message().to_string(),
            },
        },
        other => WalletError::Transport(other.to_string()),
    }
}

/// Provider half of an RPC wallet connection.
#[derive(Clone)]
pub struct RpcProvider {
    client: Arc<HttpClient>,
    listeners: Arc<EventListeners>,
}

#[async_trait]
impl WalletProvider for RpcProvider {
    async fn request(&self, method: &str, params: Vec<Value>) -> Result<Value, WalletError> {
        debug!(method, "Forwarding provider request");
        self.client
            .request::<Value, _>(method, params)
            .await
            .map_err(map_client_error)
    }

    fn subscribe(&self, listener: UnboundedSender<ProviderEvent>) {
        self.listeners.subscribe(listener);
    }
}

/// Wallet SDK speaking JSON-RPC over HTTP.
pub struct RpcWalletSdk {
    options: ConnectionOptions,
    hooks: Arc<dyn ModalHooks>,
    provider: RpcProvider,
}

impl RpcWalletSdk {
    /// Create an SDK instance for the wallet at `endpoint`.
    pub fn new(
        endpoint: &str,
        options: ConnectionOptions,
        hooks: Arc<dyn ModalHooks>,
    ) -> Result<Self, WalletError> {
        let client = HttpClientBuilder::default()
            .request_timeout(REQUEST_TIMEOUT)
            .build(endpoint)
            .map_err(|e| WalletError::Transport(e.to_string()))?;

        Ok(Self {
            options,
            hooks,
            provider: RpcProvider {
                client: Arc::new(client),
                listeners: Arc::new(EventListeners::new()),
            },
        })
    }
}

#[async_trait]
impl WalletSdk for RpcWalletSdk {
    type Provider = RpcProvider;

    async fn connect(&mut self) -> Result<Vec<String>, WalletError> {
        let client = &self.provider.client;

        if self.options.check_installation_immediately {
            let status: WalletStatus = client
                .request(WALLET_STATUS, Vec::<()>::new())
                .await
                .map_err(|e| WalletError::NotInstalled(e.to_string()))?;
            debug!(wallet = %status.name, version = %status.version, "Wallet detected");
        }

        let pairing: ConnectionRequest = client
            .request(
                WALLET_REQUEST_CONNECTION,
                vec![self.options.dapp_metadata.clone()],
            )
            .await
            .map_err(map_client_error)?;
        debug!(request_id = pairing.request_id, "Pairing request opened");

        self.hooks.install(&pairing.link);
        self.hooks.mount_otp();
        self.hooks.update_otp_value(&pairing.otp);

        let accounts: Vec<String> = client
            .request(WALLET_APPROVE_CONNECTION, vec![pairing.request_id])
            .await
            .map_err(map_client_error)?;
        debug!(accounts = accounts.len(), "Pairing approved");

        self.provider.listeners.mark_initialized();
        Ok(accounts)
    }

    fn provider(&self) -> RpcProvider {
        self.provider.clone()
    }
}
