//! Mock wallet server for local testing of the auction house client.
//!
//! This provides a JSON-RPC server that plays the part of a mobile wallet:
//! it hands out pairing links and one-time passcodes, approves connections
//! with a rotating set of accounts, and answers typed-data signature requests
//! with placeholder signatures.

use std::collections::{HashMap, HashSet};
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use jsonrpsee::core::async_trait;
use jsonrpsee::proc_macros::rpc;
use jsonrpsee::server::{Server, ServerHandle};
use jsonrpsee::types::ErrorObjectOwned;
use parking_lot::RwLock;
use rand::Rng;
use sha2::{Digest, Sha256};
use tracing::{info, warn};

use auction_house_types::wallet_rpc::{
    ConnectionRequest, DappMetadata, WalletStatus, INVALID_PARAMS_CODE, UNAUTHORIZED_CODE,
    USER_REJECTED_CODE,
};
use auction_house_types::TypedData;

/// Behavior switches for the mock wallet.
#[derive(Debug, Clone)]
pub struct MockWalletConfig {
    /// Accounts handed out, one per approved connection, in rotation
    pub accounts: Vec<String>,
    /// Decline every signature request
    pub reject_signatures: bool,
    /// Decline every connection request
    pub reject_connections: bool,
}

impl Default for MockWalletConfig {
    fn default() -> Self {
        Self {
            accounts: vec![
                "0x70997970C51812dc3A010C7d01b50e0d17dc79C8".to_string(),
                "0x3C44CdDdB6a900fa2b585dd299e03d12FA4293BC".to_string(),
            ],
            reject_signatures: false,
            reject_connections: false,
        }
    }
}

/// Shared wallet state.
#[derive(Default)]
struct WalletState {
    /// Next pairing request ID to assign
    next_request_id: u64,
    /// Open pairing requests
    pending: HashMap<u64, DappMetadata>,
    /// Number of approved connections (drives account rotation)
    approved: usize,
    /// Lowercased accounts the user has connected
    authorized: HashSet<String>,
}

impl WalletState {
    fn allocate_request_id(&mut self) -> u64 {
        self.next_request_id += 1;
        self.next_request_id
    }
}

/// RPC API exposed by the mock wallet.
#[rpc(server)]
pub trait MockWalletApi {
    /// Report wallet name and version.
    #[method(name = "wallet_status")]
    async fn wallet_status(&self) -> Result<WalletStatus, ErrorObjectOwned>;

    /// Open a pairing request for a dapp.
    #[method(name = "wallet_requestConnection")]
    async fn request_connection(
        &self,
        dapp: DappMetadata,
    ) -> Result<ConnectionRequest, ErrorObjectOwned>;

    /// Approve a pairing request and return the connected accounts.
    #[method(name = "wallet_approveConnection")]
    async fn approve_connection(&self, request_id: u64) -> Result<Vec<String>, ErrorObjectOwned>;

    /// Sign EIP-712 typed data.
    #[method(name = "eth_signTypedData_v4")]
    async fn sign_typed_data_v4(
        &self,
        address: String,
        typed_data: String,
    ) -> Result<String, ErrorObjectOwned>;
}

/// Implementation of the mock wallet RPC server.
pub struct MockWalletServer {
    config: MockWalletConfig,
    state: Arc<RwLock<WalletState>>,
}

impl MockWalletServer {
    pub fn new(config: MockWalletConfig) -> Self {
        Self {
            config,
            state: Arc::new(RwLock::new(WalletState::default())),
        }
    }

    fn rpc_error(code: i32, msg: &str) -> ErrorObjectOwned {
        ErrorObjectOwned::owned(code, msg.to_string(), None::<()>)
    }

    fn user_rejected() -> ErrorObjectOwned {
        Self::rpc_error(USER_REJECTED_CODE, "User rejected the request.")
    }
}

#[async_trait]
impl MockWalletApiServer for MockWalletServer {
    async fn wallet_status(&self) -> Result<WalletStatus, ErrorObjectOwned> {
        Ok(WalletStatus {
            name: "mock-wallet".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        })
    }

    async fn request_connection(
        &self,
        dapp: DappMetadata,
    ) -> Result<ConnectionRequest, ErrorObjectOwned> {
        let otp = rand::thread_rng().gen_range(10..100u32).to_string();

        let mut state = self.state.write();
        let request_id = state.allocate_request_id();
        info!(request_id, dapp = %dapp.name, "Pairing requested");

        let link = format!("mockwallet://connect?requestId={}&origin={}", request_id, dapp.url);
        state.pending.insert(request_id, dapp);

        Ok(ConnectionRequest {
            request_id,
            link,
            otp,
        })
    }

    async fn approve_connection(&self, request_id: u64) -> Result<Vec<String>, ErrorObjectOwned> {
        let mut state = self.state.write();

        let dapp = state.pending.remove(&request_id).ok_or_else(|| {
            Self::rpc_error(INVALID_PARAMS_CODE, &format!("Unknown request {}", request_id))
        })?;

        if self.config.reject_connections {
            warn!(request_id, "Connection rejected");
            return Err(Self::user_rejected());
        }

        if self.config.accounts.is_empty() {
            return Err(Self::rpc_error(-32000, "No accounts configured"));
        }

        let account = self.config.accounts[state.approved % self.config.accounts.len()].clone();
        state.approved += 1;
        state.authorized.insert(account.to_lowercase());

        info!(request_id, dapp = %dapp.name, %account, "Connection approved");
        Ok(vec![account])
    }

    async fn sign_typed_data_v4(
        &self,
        address: String,
        typed_data: String,
    ) -> Result<String, ErrorObjectOwned> {
        let parsed: TypedData = serde_json::from_str(&typed_data).map_err(|e| {
            Self::rpc_error(INVALID_PARAMS_CODE, &format!("Invalid typed data: {}", e))
        })?;

        if !parsed.message.from.wallet.eq_ignore_ascii_case(&address) {
            return Err(Self::rpc_error(
                INVALID_PARAMS_CODE,
                "Signer does not match message sender",
            ));
        }

        if !self.state.read().authorized.contains(&address.to_lowercase()) {
            return Err(Self::rpc_error(UNAUTHORIZED_CODE, "Account not connected"));
        }

        if self.config.reject_signatures {
            warn!(%address, "Signature rejected");
            return Err(Self::user_rejected());
        }

        info!(
            %address,
            item_id = parsed.message.item_id,
            bid_amount = parsed.message.bid_amount,
            "Signed typed data"
        );
        Ok(placeholder_signature(&address, &typed_data))
    }
}

/// Deterministic 65-byte signature-shaped value. Not a real ECDSA signature.
pub fn placeholder_signature(address: &str, typed_data: &str) -> String {
    let part = |tag: &[u8]| -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(tag);
        hasher.update(address.to_lowercase().as_bytes());
        hasher.update(typed_data.as_bytes());
        hasher.finalize().into()
    };

    format!("0x{}{}1b", hex::encode(part(b"r")), hex::encode(part(b"s")))
}

/// Start the mock wallet on `addr` and return the bound address and server handle.
pub async fn spawn(addr: SocketAddr, config: MockWalletConfig) -> Result<(SocketAddr, ServerHandle)> {
    let server = Server::builder().build(addr).await?;
    let local_addr = server.local_addr()?;
    let handle = server.start(MockWalletServer::new(config).into_rpc());

    info!("Mock wallet listening on {}", local_addr);
    Ok((local_addr, handle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use auction_house_types::create_bid;

    fn dapp() -> DappMetadata {
        DappMetadata {
            name: "Test".to_string(),
            url: "https://localhost:3000".to_string(),
        }
    }

    async fn connect(server: &MockWalletServer) -> String {
        let request = server.request_connection(dapp()).await.unwrap();
        server
            .approve_connection(request.request_id)
            .await
            .unwrap()
            .remove(0)
    }

    #[tokio::test]
    async fn test_pairing_rotates_accounts() {
        let config = MockWalletConfig::default();
        let server = MockWalletServer::new(config.clone());

        let request = server.request_connection(dapp()).await.unwrap();
        assert_eq!(request.otp.len(), 2);
        assert!(request.link.contains(&request.request_id.to_string()));

        let first = server.approve_connection(request.request_id).await.unwrap();
        assert_eq!(first, vec![config.accounts[0].clone()]);
        assert!(server.approve_connection(request.request_id).await.is_err());

        assert_eq!(connect(&server).await, config.accounts[1]);
        assert_eq!(connect(&server).await, config.accounts[0]);
    }

    #[tokio::test]
    async fn test_sign_typed_data() {
        let server = MockWalletServer::new(MockWalletConfig::default());
        let account = connect(&server).await;
        let payload = create_bid(&account, 1, 1005).to_json().unwrap();

        let signature = server
            .sign_typed_data_v4(account.clone(), payload.clone())
            .await
            .unwrap();
        assert_eq!(signature.len(), 2 + 130);
        assert_eq!(signature, placeholder_signature(&account, &payload));
    }

    #[tokio::test]
    async fn test_sign_requires_connected_account() {
        let server = MockWalletServer::new(MockWalletConfig::default());
        let payload = create_bid("0xAAA", 1, 1005).to_json().unwrap();

        let err = server
            .sign_typed_data_v4("0xAAA".to_string(), payload)
            .await
            .unwrap_err();
        assert_eq!(err.code(), UNAUTHORIZED_CODE);
    }

    #[tokio::test]
    async fn test_sign_rejects_mismatched_sender() {
        let server = MockWalletServer::new(MockWalletConfig::default());
        let account = connect(&server).await;
        let payload = create_bid("0xBBB", 1, 1005).to_json().unwrap();

        let err = server.sign_typed_data_v4(account, payload).await.unwrap_err();
        assert_eq!(err.code(), INVALID_PARAMS_CODE);
    }

    #[tokio::test]
    async fn test_user_rejections() {
        let server = MockWalletServer::new(MockWalletConfig {
            reject_signatures: true,
            ..Default::default()
        });
        let account = connect(&server).await;
        let payload = create_bid(&account, 1, 1005).to_json().unwrap();
        let err = server.sign_typed_data_v4(account, payload).await.unwrap_err();
        assert_eq!(err.code(), USER_REJECTED_CODE);

        let server = MockWalletServer::new(MockWalletConfig {
            reject_connections: true,
            ..Default::default()
        });
        let request = server.request_connection(dapp()).await.unwrap();
        let err = server.approve_connection(request.request_id).await.unwrap_err();
        assert_eq!(err.code(), USER_REJECTED_CODE);
    }

    #[test]
    fn test_placeholder_signature_is_deterministic() {
        let a = placeholder_signature("0xAAA", "{}");
        let b = placeholder_signature("0xaaa", "{}");
        let c = placeholder_signature("0xAAA", "{ }");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a.ends_with("1b"));
    }
}
