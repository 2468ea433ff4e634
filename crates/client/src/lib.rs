//! Wallet-connected bidding client for the auction house demo.
//!
//! This crate provides:
//! - Connection options and pairing prompts for a wallet-connection SDK
//! - The SDK and provider traits, with a JSON-RPC and an in-memory implementation
//! - The bid session driver that signs EIP-712 bids and keeps the bid history

pub mod config;
pub mod error;
pub mod mock;
pub mod modals;
pub mod provider;
pub mod rpc;
pub mod sdk;
pub mod session;
pub mod sink;

pub use config::ConnectionOptions;
pub use error::{SessionError, SinkError, WalletError};
pub use modals::{ModalHooks, TerminalModals};
pub use provider::{ProviderEvent, WalletProvider};
pub use rpc::RpcWalletSdk;
pub use sdk::{sdk_factory, SdkFactory, WalletSdk};
pub use session::{BidSession, ReadyOutcome, SessionState};
pub use sink::{BidSink, DiscardSink};
