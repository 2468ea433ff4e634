//! Wire types shared by the wallet JSON-RPC client and the mock wallet.

use serde::{Deserialize, Serialize};

/// Probe used to detect whether a wallet is reachable.
pub const WALLET_STATUS: &str = "wallet_status";

/// Open a pairing request and receive the deep link and one-time passcode.
pub const WALLET_REQUEST_CONNECTION: &str = "wallet_requestConnection";

/// Wait for the user to approve a pairing request; returns the accounts.
pub const WALLET_APPROVE_CONNECTION: &str = "wallet_approveConnection";

/// Typed-data signature request.
pub const SIGN_TYPED_DATA_V4: &str = "eth_signTypedData_v4";

/// EIP-1193 error code: the user rejected the request.
pub const USER_REJECTED_CODE: i32 = 4001;

/// EIP-1193 error code: the requested account has not been authorized.
pub const UNAUTHORIZED_CODE: i32 = 4100;

/// JSON-RPC error code for malformed parameters.
pub const INVALID_PARAMS_CODE: i32 = -32602;

/// Application metadata shown by the wallet when pairing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DappMetadata {
    pub name: String,
    pub url: String,
}

/// Wallet identification returned by `wallet_status`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WalletStatus {
    pub name: String,
    pub version: String,
}

/// A pending pairing request.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionRequest {
    pub request_id: u64,
    /// Link the user opens (or scans) on the wallet device
    pub link: String,
    /// One-time passcode the user must pick in the wallet
    pub otp: String,
}
