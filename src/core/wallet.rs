use std::fmt;

use super::constants::{DROPPED_AFTER_MISSING_POLLS, RECEIPT_STATUS_SUCCESS};
use super::contract::parse_quantity;
use super::network_config::NetworkConfig;

// error type
#[derive(Debug, Clone, PartialEq)]
pub enum WalletError {
    NotInstalled,
    NoAccount,
    /// The user declined the request in the wallet. Carries the wallet's own message.
    Rejected(String),
    Rpc(String),
    /// The wallet is connected to a chain other than the deployment's
    WrongChain { expected: String, actual: String },
    Reverted(TxHash),
    /// The node no longer knows the transaction, e.g. it was replaced or evicted
    Dropped(TxHash),
    Timeout(TxHash),
    InvalidResponse(String),
    JavaScript(String),
}

// Rejection and RPC messages are passed through untouched so the UI can show them verbatim
impl fmt::Display for WalletError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WalletError::NotInstalled => write!(f, "No Ethereum wallet found in this browser"),
            WalletError::NoAccount => write!(f, "No wallet account connected"),
            WalletError::Rejected(msg) => write!(f, "{}", msg),
            WalletError::Rpc(msg) => write!(f, "{}", msg),
            WalletError::WrongChain { expected, actual } => {
                write!(f, "Wallet is on chain {}, switch it to chain {}", actual, expected)
            }
            WalletError::Reverted(hash) => write!(f, "Transaction {} reverted", hash),
            WalletError::Dropped(hash) => write!(f, "Transaction {} was dropped or replaced", hash),
            WalletError::Timeout(hash) => write!(f, "Timed out waiting for transaction {}", hash),
            WalletError::InvalidResponse(msg) => write!(f, "Invalid wallet response: {}", msg),
            WalletError::JavaScript(msg) => write!(f, "JavaScript error: {}", msg),
        }
    }
}

/// Hash of a transaction accepted into the pending pool
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TxHash(String);

impl TxHash {
    pub fn new(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Confirmed, non-reverted transaction receipt
#[derive(Debug, Clone, PartialEq)]
pub struct Receipt {
    pub transaction_hash: TxHash,
    pub block_number: Option<u64>,
    /// Contract the transaction was sent to
    pub to: Option<String>,
}

impl Receipt {
    /// Interpret an `eth_getTransactionReceipt` result. A non-success status is a revert.
    pub fn from_rpc(hash: &TxHash, receipt: &serde_json::Value) -> Result<Self, WalletError> {
        let status = receipt["status"].as_str().unwrap_or(RECEIPT_STATUS_SUCCESS);
        if status != RECEIPT_STATUS_SUCCESS {
            return Err(WalletError::Reverted(hash.clone()));
        }

        let block_number = match receipt["blockNumber"].as_str() {
            Some(quantity) => Some(
                parse_quantity(quantity).map_err(|e| WalletError::InvalidResponse(e.to_string()))?,
            ),
            None => None,
        };

        Ok(Receipt {
            transaction_hash: hash.clone(),
            block_number,
            to: receipt["to"].as_str().map(str::to_string),
        })
    }
}

/// Tracks successive receipt polls of one transaction.
///
/// Each poll pairs the `eth_getTransactionReceipt` result with the
/// `eth_getTransactionByHash` result. A receipt settles the wait; a
/// transaction missing from the node on enough consecutive polls is dropped.
#[derive(Debug, Default)]
pub struct ReceiptTracker {
    missing_polls: u32,
}

impl ReceiptTracker {
    /// Returns `None` while the transaction is still pending
    pub fn observe(
        &mut self,
        hash: &TxHash,
        receipt: &serde_json::Value,
        transaction: &serde_json::Value,
    ) -> Option<Result<Receipt, WalletError>> {
        if !receipt.is_null() {
            return Some(Receipt::from_rpc(hash, receipt));
        }

        if transaction.is_null() {
            self.missing_polls += 1;
            if self.missing_polls >= DROPPED_AFTER_MISSING_POLLS {
                return Some(Err(WalletError::Dropped(hash.clone())));
            }
        } else {
            self.missing_polls = 0;
        }
        None
    }
}

/// Capabilities the mint coordinator needs from the wallet provider.
///
/// The browser implementation talks to the injected EIP-1193 provider; tests
/// substitute a scripted fake. All calls complete on the single UI thread, so
/// the futures are not required to be `Send`.
#[allow(async_fn_in_trait)]
pub trait WalletProvider {
    /// Currently connected account, if any
    fn current_account(&self) -> Option<String>;

    /// Read `totalSupply()` of the configured contract
    async fn read_total_minted(&self, network: &NetworkConfig) -> Result<u64, WalletError>;

    /// Ask the wallet to sign and broadcast `mint()`. Resolves once the
    /// transaction is in the pending pool.
    async fn submit_mint(&self, network: &NetworkConfig) -> Result<TxHash, WalletError>;

    /// Wait until the transaction is included. A reverted transaction is an error.
    async fn wait_for_receipt(&self, hash: &TxHash) -> Result<Receipt, WalletError>;
}

/// Shorten an account for display, e.g. `0x1234...abcd`
pub fn short_address(address: &str) -> String {
    if address.len() <= 10 {
        return address.to_string();
    }
    match (address.get(..6), address.get(address.len() - 4..)) {
        (Some(head), Some(tail)) => format!("{}...{}", head, tail),
        _ => address.to_string(),
    }
}
