//! Error types for the bidding client.

use thiserror::Error;

/// Errors surfaced by a wallet SDK or provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalletError {
    #[error("Wallet not installed or unreachable: {0}")]
    NotInstalled(String),

    #[error("User rejected the request")]
    UserRejected,

    #[error("Account not authorized: {0}")]
    Unauthorized(String),

    #[error("Wallet RPC error {code}: {message}")]
    Rpc { code: i32, message: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),
}

/// Errors raised by the bid session driver.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Connection failed: {0}")]
    Connect(#[source] WalletError),

    #[error("Signature request failed: {0}")]
    Sign(#[source] WalletError),

    #[error("No active wallet connection")]
    NotConnected,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors raised by a bid sink.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Bid sink unavailable: {0}")]
    Unavailable(String),
}
