//! Mint transaction lifecycle coordinator.
//!
//! `MintState` is a pure state machine: the UI and the async driver feed it
//! one `MintEvent` at a time and perform whatever `Effect` it hands back.
//! Nothing in here touches the wallet directly.

use super::mount::MountGate;
use super::wallet::{Receipt, TxHash};

/// Mint Submitter state
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SubmitState {
    #[default]
    Idle,
    AwaitingApproval,
    Submitted(TxHash),
    Failed(String),
}

/// Receipt Watcher state, tied to one transaction hash
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ReceiptState {
    #[default]
    Idle,
    Watching(TxHash),
    Confirmed(Receipt),
    Failed { hash: TxHash, reason: String },
}

/// User-facing outcome, derived from the submitter and the watcher
#[derive(Debug, Clone, PartialEq)]
pub enum TransactionOutcome {
    NotStarted,
    PendingApproval,
    Submitted(TxHash),
    Confirmed(TxHash),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum MintEvent {
    /// Host finished the first client-side render
    Mounted,
    ConnectionChanged(bool),
    SupplyFetched(u64),
    SupplyFetchFailed(String),
    /// The user pressed the mint trigger
    MintRequested,
    MintSubmitted(TxHash),
    MintFailed(String),
    ReceiptConfirmed(Receipt),
    ReceiptFailed { hash: TxHash, reason: String },
}

/// Work the driver has to perform after an event was applied
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    SubmitMint,
    WatchReceipt(TxHash),
    RefreshSupply,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MintState {
    mount: MountGate,
    connected: bool,
    minted_count: u64,
    submission: SubmitState,
    receipt: ReceiptState,
}

impl MintState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one event and return the follow-up work, if any.
    pub fn apply(&mut self, event: MintEvent) -> Option<Effect> {
        match event {
            MintEvent::Mounted => {
                if self.mount.open() {
                    log::debug!("Mount gate opened");
                }
                None
            }
            MintEvent::ConnectionChanged(connected) => {
                if self.connected != connected {
                    log::info!("Wallet {}", if connected { "connected" } else { "disconnected" });
                }
                self.connected = connected;
                None
            }
            MintEvent::SupplyFetched(count) => {
                if count >= self.minted_count {
                    self.minted_count = count;
                } else {
                    log::debug!("Ignoring lagging supply read {} (showing {})", count, self.minted_count);
                }
                None
            }
            MintEvent::SupplyFetchFailed(reason) => {
                log::warn!("Supply read failed, keeping {}: {}", self.minted_count, reason);
                None
            }
            MintEvent::MintRequested => {
                if !self.can_mint() {
                    log::debug!("Mint trigger ignored in state {:?}", self.outcome());
                    return None;
                }
                log::info!("Mint requested, waiting for wallet approval");
                self.submission = SubmitState::AwaitingApproval;
                self.receipt = ReceiptState::Idle;
                Some(Effect::SubmitMint)
            }
            MintEvent::MintSubmitted(hash) => {
                if self.submission != SubmitState::AwaitingApproval {
                    log::debug!("Ignoring unexpected submission {}", hash);
                    return None;
                }
                log::info!("Mint transaction submitted: {}", hash);
                self.submission = SubmitState::Submitted(hash.clone());
                self.receipt = ReceiptState::Watching(hash.clone());
                Some(Effect::WatchReceipt(hash))
            }
            MintEvent::MintFailed(reason) => {
                if self.submission != SubmitState::AwaitingApproval {
                    log::debug!("Ignoring unexpected submission failure: {}", reason);
                    return None;
                }
                log::error!("Mint submission failed: {}", reason);
                self.submission = SubmitState::Failed(reason);
                None
            }
            MintEvent::ReceiptConfirmed(receipt) => {
                if !self.is_watching(&receipt.transaction_hash) {
                    log::debug!("Ignoring receipt for stale transaction {}", receipt.transaction_hash);
                    return None;
                }
                log::info!("Mint transaction confirmed: {}", receipt.transaction_hash);
                self.receipt = ReceiptState::Confirmed(receipt);
                Some(Effect::RefreshSupply)
            }
            MintEvent::ReceiptFailed { hash, reason } => {
                if !self.is_watching(&hash) {
                    log::debug!("Ignoring receipt failure for stale transaction {}", hash);
                    return None;
                }
                log::error!("Mint transaction {} failed: {}", hash, reason);
                self.receipt = ReceiptState::Failed { hash, reason };
                None
            }
        }
    }

    fn is_watching(&self, hash: &TxHash) -> bool {
        matches!(&self.receipt, ReceiptState::Watching(current) if current == hash)
    }

    pub fn outcome(&self) -> TransactionOutcome {
        match &self.receipt {
            ReceiptState::Confirmed(receipt) => return TransactionOutcome::Confirmed(receipt.transaction_hash.clone()),
            ReceiptState::Failed { reason, .. } => return TransactionOutcome::Failed(reason.clone()),
            ReceiptState::Watching(hash) => return TransactionOutcome::Submitted(hash.clone()),
            ReceiptState::Idle => {}
        }
        match &self.submission {
            SubmitState::Idle => TransactionOutcome::NotStarted,
            SubmitState::AwaitingApproval => TransactionOutcome::PendingApproval,
            SubmitState::Submitted(hash) => TransactionOutcome::Submitted(hash.clone()),
            SubmitState::Failed(reason) => TransactionOutcome::Failed(reason.clone()),
        }
    }

    /// The mint trigger is rendered once mounted and connected
    pub fn shows_mint_trigger(&self) -> bool {
        self.mount.is_ready() && self.connected
    }

    /// Whether the mint trigger is enabled
    pub fn can_mint(&self) -> bool {
        self.shows_mint_trigger()
            && !matches!(
                self.outcome(),
                TransactionOutcome::PendingApproval
                    | TransactionOutcome::Submitted(_)
                    | TransactionOutcome::Confirmed(_)
            )
    }

    /// Drives the card flip. True only for a confirmed receipt.
    pub fn is_minted(&self) -> bool {
        matches!(self.receipt, ReceiptState::Confirmed(_))
    }

    pub fn minted_count(&self) -> u64 {
        self.minted_count
    }

    #[cfg(test)]
    pub fn receipt(&self) -> &ReceiptState {
        &self.receipt
    }

    /// Hash of the current attempt, once the wallet accepted it
    pub fn transaction_hash(&self) -> Option<&TxHash> {
        match &self.receipt {
            ReceiptState::Watching(hash) | ReceiptState::Failed { hash, .. } => Some(hash),
            ReceiptState::Confirmed(receipt) => Some(&receipt.transaction_hash),
            ReceiptState::Idle => match &self.submission {
                SubmitState::Submitted(hash) => Some(hash),
                _ => None,
            },
        }
    }

    pub fn confirmed_receipt(&self) -> Option<&Receipt> {
        match &self.receipt {
            ReceiptState::Confirmed(receipt) => Some(receipt),
            _ => None,
        }
    }

    /// Raw failure message of the current attempt
    pub fn error_message(&self) -> Option<&str> {
        match (&self.submission, &self.receipt) {
            (_, ReceiptState::Failed { reason, .. }) => Some(reason),
            (SubmitState::Failed(reason), _) => Some(reason),
            _ => None,
        }
    }

    pub fn button_label(&self) -> &'static str {
        match self.outcome() {
            TransactionOutcome::PendingApproval => "Waiting for approval",
            TransactionOutcome::Submitted(_) => "Minting...",
            _ => "Mint",
        }
    }
}
