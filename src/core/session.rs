use super::mint_state::{Effect, MintEvent, MintState};
use super::network_config::NetworkConfig;
use super::wallet::WalletProvider;

/// Perform one effect against the wallet and report the result as an event.
///
/// Every effect resolves to exactly one event, failures included, so the
/// coordinator always hears back.
pub async fn perform<W: WalletProvider>(wallet: &W, network: &NetworkConfig, effect: Effect) -> MintEvent {
    match effect {
        Effect::SubmitMint => match wallet.submit_mint(network).await {
            Ok(hash) => MintEvent::MintSubmitted(hash),
            Err(e) => MintEvent::MintFailed(e.to_string()),
        },
        Effect::WatchReceipt(hash) => match wallet.wait_for_receipt(&hash).await {
            Ok(receipt) => MintEvent::ReceiptConfirmed(receipt),
            Err(e) => MintEvent::ReceiptFailed { hash, reason: e.to_string() },
        },
        Effect::RefreshSupply => match wallet.read_total_minted(network).await {
            Ok(count) => MintEvent::SupplyFetched(count),
            Err(e) => MintEvent::SupplyFetchFailed(e.to_string()),
        },
    }
}

/// Connection Observer: project the provider's account onto a connection event
pub fn connection_event<W: WalletProvider>(wallet: &W) -> MintEvent {
    MintEvent::ConnectionChanged(wallet.current_account().is_some())
}

/// Sequential driver that owns the coordinator and runs effects to completion
pub struct MintSession<W: WalletProvider> {
    wallet: W,
    network: &'static NetworkConfig,
    state: MintState,
}

impl<W: WalletProvider> MintSession<W> {
    pub fn new(wallet: W, network: &'static NetworkConfig) -> Self {
        Self {
            wallet,
            network,
            state: MintState::new(),
        }
    }

    pub fn state(&self) -> &MintState {
        &self.state
    }

    pub fn wallet(&self) -> &W {
        &self.wallet
    }

    /// Apply an event, then keep performing effects until the chain settles
    pub async fn dispatch(&mut self, event: MintEvent) {
        let mut next = Some(event);
        while let Some(event) = next.take() {
            if let Some(effect) = self.state.apply(event) {
                next = Some(perform(&self.wallet, self.network, effect).await);
            }
        }
    }

    pub async fn refresh_connection(&mut self) {
        let event = connection_event(&self.wallet);
        self.dispatch(event).await;
    }

    pub async fn refresh_supply(&mut self) {
        let event = perform(&self.wallet, self.network, Effect::RefreshSupply).await;
        self.dispatch(event).await;
    }

    pub async fn mint(&mut self) {
        self.dispatch(MintEvent::MintRequested).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::mint_state::TransactionOutcome;
    use crate::core::wallet::{Receipt, TxHash, WalletError};
    use std::cell::{Cell, RefCell};
    use std::collections::VecDeque;

    #[derive(Default)]
    struct ScriptedWallet {
        account: RefCell<Option<String>>,
        supply: RefCell<VecDeque<Result<u64, WalletError>>>,
        submissions: RefCell<VecDeque<Result<TxHash, WalletError>>>,
        receipts: RefCell<VecDeque<Result<Receipt, WalletError>>>,
        submit_calls: Cell<usize>,
        watched: RefCell<Vec<TxHash>>,
    }

    impl ScriptedWallet {
        fn connected() -> Self {
            let wallet = Self::default();
            *wallet.account.borrow_mut() = Some("0x1234567890abcdef".to_string());
            wallet
        }
    }

    impl WalletProvider for ScriptedWallet {
        fn current_account(&self) -> Option<String> {
            self.account.borrow().clone()
        }

        async fn read_total_minted(&self, _network: &NetworkConfig) -> Result<u64, WalletError> {
            self.supply
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(WalletError::Rpc("no scripted supply".to_string())))
        }

        async fn submit_mint(&self, _network: &NetworkConfig) -> Result<TxHash, WalletError> {
            self.submit_calls.set(self.submit_calls.get() + 1);
            self.submissions.borrow_mut().pop_front().expect("unexpected submission")
        }

        async fn wait_for_receipt(&self, hash: &TxHash) -> Result<Receipt, WalletError> {
            self.watched.borrow_mut().push(hash.clone());
            self.receipts.borrow_mut().pop_front().expect("unexpected receipt wait")
        }
    }

    fn confirmed(hash: &str) -> Receipt {
        Receipt {
            transaction_hash: TxHash::new(hash),
            block_number: Some(1),
            to: None,
        }
    }

    async fn ready_session(wallet: ScriptedWallet) -> MintSession<ScriptedWallet> {
        let mut session = MintSession::new(wallet, NetworkConfig::demo());
        session.dispatch(MintEvent::Mounted).await;
        session.refresh_connection().await;
        session
    }

    #[tokio::test]
    async fn test_successful_mint_refreshes_supply() {
        let wallet = ScriptedWallet::connected();
        wallet.supply.borrow_mut().extend([Ok(41), Ok(42)]);
        wallet.submissions.borrow_mut().push_back(Ok(TxHash::new("0xABC")));
        wallet.receipts.borrow_mut().push_back(Ok(confirmed("0xABC")));

        let mut session = ready_session(wallet).await;
        session.refresh_supply().await;
        assert_eq!(session.state().minted_count(), 41);
        assert!(session.state().can_mint());

        session.mint().await;

        let state = session.state();
        assert!(state.is_minted());
        assert_eq!(state.outcome(), TransactionOutcome::Confirmed(TxHash::new("0xABC")));
        assert_eq!(state.minted_count(), 42);
        assert_eq!(*session.wallet().watched.borrow(), vec![TxHash::new("0xABC")]);
    }

    #[tokio::test]
    async fn test_rejection_is_surfaced_verbatim() {
        let wallet = ScriptedWallet::connected();
        wallet
            .submissions
            .borrow_mut()
            .push_back(Err(WalletError::Rejected("user denied transaction".to_string())));

        let mut session = ready_session(wallet).await;
        session.mint().await;

        let state = session.state();
        assert_eq!(state.error_message(), Some("user denied transaction"));
        assert!(state.can_mint());
        assert!(session.wallet().watched.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_revert_then_retry() {
        let wallet = ScriptedWallet::connected();
        wallet.submissions.borrow_mut().extend([Ok(TxHash::new("0x1")), Ok(TxHash::new("0x2"))]);
        wallet.receipts.borrow_mut().extend([
            Err(WalletError::Reverted(TxHash::new("0x1"))),
            Ok(confirmed("0x2")),
        ]);
        wallet.supply.borrow_mut().push_back(Ok(7));

        let mut session = ready_session(wallet).await;
        session.mint().await;
        assert_eq!(
            session.state().outcome(),
            TransactionOutcome::Failed("Transaction 0x1 reverted".to_string())
        );
        assert!(!session.state().is_minted());

        session.mint().await;
        assert!(session.state().is_minted());
        assert_eq!(session.state().error_message(), None);
        assert_eq!(session.wallet().submit_calls.get(), 2);
    }

    #[tokio::test]
    async fn test_supply_failure_keeps_count() {
        let wallet = ScriptedWallet::connected();
        wallet
            .supply
            .borrow_mut()
            .extend([Ok(42), Err(WalletError::Rpc("timeout".to_string()))]);

        let mut session = ready_session(wallet).await;
        session.refresh_supply().await;
        session.refresh_supply().await;
        assert_eq!(session.state().minted_count(), 42);
        assert_eq!(session.state().error_message(), None);
    }

    #[tokio::test]
    async fn test_disconnected_wallet_never_submits() {
        let mut session = ready_session(ScriptedWallet::default()).await;
        assert!(!session.state().shows_mint_trigger());

        session.mint().await;
        assert_eq!(session.wallet().submit_calls.get(), 0);
        assert_eq!(session.state().outcome(), TransactionOutcome::NotStarted);
    }

    #[tokio::test]
    async fn test_perform_maps_receipt_errors_to_current_hash() {
        let wallet = ScriptedWallet::connected();
        wallet
            .receipts
            .borrow_mut()
            .push_back(Err(WalletError::Rpc("transaction replaced".to_string())));
        let network = NetworkConfig::demo();

        let event = perform(&wallet, network, Effect::WatchReceipt(TxHash::new("0x9"))).await;
        assert_eq!(
            event,
            MintEvent::ReceiptFailed {
                hash: TxHash::new("0x9"),
                reason: "transaction replaced".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_dropped_transaction_rearms_trigger() {
        let wallet = ScriptedWallet::connected();
        wallet.submissions.borrow_mut().push_back(Ok(TxHash::new("0xD")));
        wallet
            .receipts
            .borrow_mut()
            .push_back(Err(WalletError::Dropped(TxHash::new("0xD"))));

        let mut session = ready_session(wallet).await;
        session.mint().await;

        let state = session.state();
        assert_eq!(
            state.outcome(),
            TransactionOutcome::Failed("Transaction 0xD was dropped or replaced".to_string())
        );
        assert!(state.can_mint());
        assert!(!state.is_minted());
    }

    #[tokio::test]
    async fn test_wrong_chain_blocks_submission() {
        let wallet = ScriptedWallet::connected();
        wallet.submissions.borrow_mut().push_back(Err(WalletError::WrongChain {
            expected: NetworkConfig::demo().chain_id_hex(),
            actual: "0x1".to_string(),
        }));

        let mut session = ready_session(wallet).await;
        session.mint().await;

        let state = session.state();
        assert_eq!(state.error_message(), Some("Wallet is on chain 0x1, switch it to chain 0x4"));
        assert!(state.can_mint());
        assert!(session.wallet().watched.borrow().is_empty());
    }
}
