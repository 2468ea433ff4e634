//! EIP-712 typed data for auction bids.
//!
//! The structures serialize to the JSON document a wallet expects as the second
//! parameter of `eth_signTypedData_v4`.

use serde::{Deserialize, Serialize};

/// Domain name the bid is scoped to.
pub const DOMAIN_NAME: &str = "Ether Mail";

/// Domain version.
pub const DOMAIN_VERSION: &str = "1";

/// Chain id, hex encoded (Linea Goerli).
pub const DOMAIN_CHAIN_ID: &str = "0xe704";

/// Contract that will eventually verify bids.
pub const VERIFYING_CONTRACT: &str = "0xCcCCccccCCCCcCCCCCCcCcCccCcCCCcCcccccccC";

/// Display name attached to every bidder.
pub const BIDDER_NAME: &str = "Bidder";

/// Name of the primary struct being signed.
pub const PRIMARY_TYPE: &str = "Bid";

/// A single member of an EIP-712 struct definition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeField {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl TypeField {
    fn new(name: &str, kind: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: kind.to_string(),
        }
    }
}

/// Struct definitions referenced by a bid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BidTypes {
    #[serde(rename = "EIP712Domain")]
    pub eip712_domain: Vec<TypeField>,
    #[serde(rename = "Bid")]
    pub bid: Vec<TypeField>,
    #[serde(rename = "Person")]
    pub person: Vec<TypeField>,
}

impl Default for BidTypes {
    fn default() -> Self {
        Self {
            eip712_domain: vec![
                TypeField::new("name", "string"),
                TypeField::new("version", "string"),
                TypeField::new("chainId", "uint256"),
                TypeField::new("verifyingContract", "address"),
            ],
            bid: vec![
                TypeField::new("from", "Person"),
                TypeField::new("itemId", "uint256"),
                TypeField::new("bidAmount", "uint256"),
            ],
            person: vec![
                TypeField::new("name", "string"),
                TypeField::new("wallet", "address"),
            ],
        }
    }
}

/// EIP-712 domain separator fields.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Eip712Domain {
    pub name: String,
    pub version: String,
    pub chain_id: String,
    pub verifying_contract: String,
}

impl Default for Eip712Domain {
    fn default() -> Self {
        Self {
            name: DOMAIN_NAME.to_string(),
            version: DOMAIN_VERSION.to_string(),
            chain_id: DOMAIN_CHAIN_ID.to_string(),
            verifying_contract: VERIFYING_CONTRACT.to_string(),
        }
    }
}

/// Identity of the bidder.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub name: String,
    pub wallet: String,
}

/// The `Bid` struct value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BidMessage {
    pub from: Person,
    pub item_id: u64,
    pub bid_amount: u64,
}

/// Complete typed-data document handed to the wallet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypedData {
    pub types: BidTypes,
    pub primary_type: String,
    pub domain: Eip712Domain,
    pub message: BidMessage,
}

impl TypedData {
    /// Serialize to the JSON string passed to `eth_signTypedData_v4`.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Build the typed-data payload for a bid.
///
/// Domain and type definitions are fixed; only the bidder, item and amount vary.
pub fn create_bid(from_address: &str, item_id: u64, bid_amount: u64) -> TypedData {
    TypedData {
        types: BidTypes::default(),
        primary_type: PRIMARY_TYPE.to_string(),
        domain: Eip712Domain::default(),
        message: BidMessage {
            from: Person {
                name: BIDDER_NAME.to_string(),
                wallet: from_address.to_string(),
            },
            item_id,
            bid_amount,
        },
    }
}
