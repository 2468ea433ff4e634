//! Wallet-connection SDK boundary.

use async_trait::async_trait;

use crate::config::ConnectionOptions;
use crate::error::WalletError;
use crate::provider::WalletProvider;

/// A wallet-connection SDK instance.
#[async_trait]
pub trait WalletSdk: Send {
    type Provider: WalletProvider;

    /// Run the connection handshake and return the authorized accounts.
    async fn connect(&mut self) -> Result<Vec<String>, WalletError>;

    /// Provider for the current connection.
    fn provider(&self) -> Self::Provider;
}

/// Builds a fresh SDK instance from connection options.
pub type SdkFactory<S> = Box<dyn Fn(&ConnectionOptions) -> Result<S, WalletError> + Send + Sync>;

/// Box a closure as an [`SdkFactory`].
pub fn sdk_factory<S, F>(build: F) -> SdkFactory<S>
where
    F: Fn(&ConnectionOptions) -> Result<S, WalletError> + Send + Sync + 'static,
{
    Box::new(build)
}
