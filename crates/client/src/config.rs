//! Connection options for the wallet SDK.

use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use auction_house_types::wallet_rpc::DappMetadata;

/// Logging switches forwarded to the SDK layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingOptions {
    /// Emit debug logs from the wallet transport
    pub sdk: bool,
}

/// Static configuration used to construct a wallet SDK.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConnectionOptions {
    /// Metadata presented to the wallet during pairing
    pub dapp_metadata: DappMetadata,
    pub logging: LoggingOptions,
    /// Probe the wallet before starting the handshake
    pub check_installation_immediately: bool,
}

impl Default for ConnectionOptions {
    fn default() -> Self {
        Self {
            dapp_metadata: DappMetadata {
                name: "Sotheb3s Auction House Demo".to_string(),
                url: "https://localhost:3000".to_string(),
            },
            logging: LoggingOptions::default(),
            check_installation_immediately: false,
        }
    }
}

impl ConnectionOptions {
    /// Load options from a JSON file. Missing fields fall back to the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_options_default() {
        let options = ConnectionOptions::default();
        assert_eq!(options.dapp_metadata.name, "Sotheb3s Auction House Demo");
        assert_eq!(options.dapp_metadata.url, "https://localhost:3000");
        assert!(!options.logging.sdk);
        assert!(!options.check_installation_immediately);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let options: ConnectionOptions =
            serde_json::from_str(r#"{ "logging": { "sdk": true } }"#).unwrap();
        assert!(options.logging.sdk);
        assert_eq!(options.dapp_metadata, ConnectionOptions::default().dapp_metadata);
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!(
            "auction-house-options-{}.json",
            std::process::id()
        ));
        std::fs::write(
            &path,
            r#"{
                "dappMetadata": { "name": "Test House", "url": "https://example.org" },
                "checkInstallationImmediately": true
            }"#,
        )
        .unwrap();

        let options = ConnectionOptions::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(options.dapp_metadata.name, "Test House");
        assert!(options.check_installation_immediately);
        assert!(!options.logging.sdk);
    }
}
