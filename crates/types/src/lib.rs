//! Core type definitions for the auction house bidding client.
//!
//! This crate provides the shared data structures used across the workspace,
//! including the EIP-712 bid payload, signed bid records, and the wire types
//! spoken between the client and a wallet.

use serde::{Deserialize, Serialize};

pub mod typed_data;
pub mod wallet_rpc;

pub use typed_data::{create_bid, BidMessage, BidTypes, Eip712Domain, Person, TypeField, TypedData};

// =========================
// BIDDING RULES
// =========================

/// Maximum number of distinct wallets onboarded before bidding stops.
pub const MAX_WALLET_CONNECTIONS: usize = 20;

/// Bid amount before any per-wallet increment is applied.
pub const BASE_BID_AMOUNT: u64 = 1000;

/// Amount added for every connection a wallet has made.
pub const BID_INCREMENT: u64 = 5;

/// Item every bid currently targets.
pub const DEFAULT_ITEM_ID: u64 = 1;

/// Compute the bid amount for a wallet that has connected `count` times.
pub fn bid_amount_for(count: u32) -> u64 {
    BASE_BID_AMOUNT + BID_INCREMENT * u64::from(count)
}

// =========================
// BID RECORDS
// =========================

/// A bid that the wallet has signed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BidRecord {
    /// Bidder wallet address
    pub from: String,
    pub item_id: u64,
    pub bid_amount: u64,
    /// Opaque signature returned by the wallet
    pub signature: String,
    /// Unix timestamp in milliseconds
    pub timestamp: u64,
}
