//! End-to-end tests for the auction house client.
//!
//! These tests run the bid session against an in-process mock wallet:
//! 1. Pairing handshake with link and passcode prompts
//! 2. Typed-data signing and bid history
//! 3. Rejections from the user
//! 4. Resetting the connection

#[cfg(test)]
mod tests {
    use std::net::SocketAddr;
    use std::sync::Arc;

    use jsonrpsee::server::ServerHandle;
    use parking_lot::Mutex;

    use auction_house_client::{
        sdk_factory, BidSession, ConnectionOptions, ModalHooks, ReadyOutcome, RpcWalletSdk,
        SessionError, SessionState, WalletError,
    };
    use auction_house_types::create_bid;
    use mock_wallet::{placeholder_signature, spawn, MockWalletConfig};

    /// Captures prompts instead of printing them.
    #[derive(Default)]
    struct RecordingModals {
        links: Mutex<Vec<String>>,
        otps: Mutex<Vec<String>>,
        mounted: Mutex<usize>,
    }

    impl ModalHooks for RecordingModals {
        fn install(&self, link: &str) {
            self.links.lock().push(link.to_string());
        }

        fn mount_otp(&self) {
            *self.mounted.lock() += 1;
        }

        fn update_otp_value(&self, otp: &str) {
            self.otps.lock().push(otp.to_string());
        }
    }

    async fn start_wallet(config: MockWalletConfig) -> (String, ServerHandle) {
        let addr: SocketAddr = "127.0.0.1:0".parse().unwrap();
        let (local, handle) = spawn(addr, config).await.unwrap();
        (format!("http://{}", local), handle)
    }

    fn session(
        endpoint: String,
        options: ConnectionOptions,
        modals: Arc<RecordingModals>,
    ) -> BidSession<RpcWalletSdk> {
        BidSession::new(
            options,
            sdk_factory(move |options| {
                RpcWalletSdk::new(&endpoint, options.clone(), modals.clone())
            }),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_connect_and_sign_bid() {
        let config = MockWalletConfig::default();
        let account = config.accounts[0].clone();
        let (endpoint, handle) = start_wallet(config).await;
        let modals = Arc::new(RecordingModals::default());
        let mut session = session(endpoint, ConnectionOptions::default(), modals.clone());

        let accounts = session.start().await.unwrap();
        assert_eq!(accounts, vec![account.clone()]);
        assert_eq!(session.state(), SessionState::Connected);

        assert_eq!(modals.links.lock().len(), 1);
        assert!(modals.links.lock()[0].starts_with("mockwallet://connect"));
        assert_eq!(*modals.mounted.lock(), 1);
        assert_eq!(modals.otps.lock()[0].len(), 2);

        let outcome = session.on_provider_ready().await.unwrap();
        let ReadyOutcome::BidPlaced(record) = outcome else {
            panic!("expected a bid");
        };

        let payload = create_bid(&account, 1, 1005).to_json().unwrap();
        assert_eq!(record.from, account);
        assert_eq!(record.bid_amount, 1005);
        assert_eq!(record.signature, placeholder_signature(&account, &payload));
        assert_eq!(session.bid_history(), &[record]);

        let outcome = session.on_provider_ready().await.unwrap();
        let ReadyOutcome::BidPlaced(record) = outcome else {
            panic!("expected a bid");
        };
        assert_eq!(record.bid_amount, 1010);
        assert_eq!(session.bid_history().len(), 2);

        handle.stop().unwrap();
    }

    #[tokio::test]
    async fn test_rejected_signature() {
        let (endpoint, handle) = start_wallet(MockWalletConfig {
            reject_signatures: true,
            ..Default::default()
        })
        .await;
        let mut session = session(
            endpoint,
            ConnectionOptions::default(),
            Arc::new(RecordingModals::default()),
        );

        session.start().await.unwrap();
        let err = session.on_provider_ready().await.unwrap_err();
        assert!(matches!(err, SessionError::Sign(WalletError::UserRejected)));
        assert!(session.bid_history().is_empty());

        handle.stop().unwrap();
    }

    #[tokio::test]
    async fn test_rejected_connection() {
        let (endpoint, handle) = start_wallet(MockWalletConfig {
            reject_connections: true,
            ..Default::default()
        })
        .await;
        let mut session = session(
            endpoint,
            ConnectionOptions::default(),
            Arc::new(RecordingModals::default()),
        );

        let err = session.start().await.unwrap_err();
        assert!(matches!(err, SessionError::Connect(WalletError::UserRejected)));
        assert_eq!(session.state(), SessionState::AwaitingConnection);

        handle.stop().unwrap();
    }

    #[tokio::test]
    async fn test_installation_check_without_wallet() {
        let options = ConnectionOptions {
            check_installation_immediately: true,
            ..Default::default()
        };
        let modals = Arc::new(RecordingModals::default());
        let mut session = session("http://127.0.0.1:1".to_string(), options, modals.clone());

        let err = session.start().await.unwrap_err();
        assert!(matches!(err, SessionError::Connect(WalletError::NotInstalled(_))));
        assert!(modals.links.lock().is_empty());
    }

    #[tokio::test]
    async fn test_new_connection_process_rotates_accounts() {
        let config = MockWalletConfig::default();
        let accounts = config.accounts.clone();
        let (endpoint, handle) = start_wallet(config).await;
        let modals = Arc::new(RecordingModals::default());
        let mut session = session(endpoint, ConnectionOptions::default(), modals.clone());

        session.start().await.unwrap();
        session.on_provider_ready().await.unwrap();

        let next = session.start_new_connection_process().await.unwrap();
        assert_eq!(next, vec![accounts[1].clone()]);
        session.on_provider_ready().await.unwrap();

        let again = session.start_new_connection_process().await.unwrap();
        assert_eq!(again, vec![accounts[0].clone()]);
        session.on_provider_ready().await.unwrap();

        let amounts: Vec<(String, u64)> = session
            .bid_history()
            .iter()
            .map(|b| (b.from.clone(), b.bid_amount))
            .collect();
        assert_eq!(
            amounts,
            vec![
                (accounts[0].clone(), 1005),
                (accounts[1].clone(), 1005),
                (accounts[0].clone(), 1010),
            ]
        );
        assert_eq!(modals.links.lock().len(), 3);

        handle.stop().unwrap();
    }
}
