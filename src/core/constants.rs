/// Shared constants for the mint contract and the wallet driver
///
/// This module centralizes the fixed values the coordinator and the
/// browser wallet adapter agree on.

// ============================================================================
// Contract Call Data
// ============================================================================

/// Function selector of `totalSupply()`
pub const TOTAL_SUPPLY_SELECTOR: [u8; 4] = [0x18, 0x16, 0x0d, 0xdd];

/// Function selector of `mint()`
pub const MINT_SELECTOR: [u8; 4] = [0x12, 0x49, 0xc5, 0x8b];

/// Size of one ABI word in bytes
pub const ABI_WORD_SIZE: usize = 32;

/// Token id shown on the marketplace link of a freshly minted card
pub const DEMO_TOKEN_ID: u64 = 1;

// ============================================================================
// Receipt Polling
// ============================================================================

/// Delay between two `eth_getTransactionReceipt` polls
pub const DEFAULT_RECEIPT_POLL_INTERVAL_MS: u32 = 4_000;

/// Lower bound for a user-configured poll interval
pub const MIN_RECEIPT_POLL_INTERVAL_MS: u32 = 500;

/// Receipt status reported for a successful transaction
pub const RECEIPT_STATUS_SUCCESS: &str = "0x1";

/// Consecutive polls on which the node must not know a transaction before
/// it is reported as dropped or replaced
pub const DROPPED_AFTER_MISSING_POLLS: u32 = 3;

// ============================================================================
// Supply Refresh
// ============================================================================

/// Cadence of the background `totalSupply()` refresh
pub const DEFAULT_SUPPLY_REFRESH_INTERVAL_MS: u32 = 15_000;

// ============================================================================
// Storage
// ============================================================================

/// Local storage key holding the JSON-encoded `AppSettings`
pub const SETTINGS_STORAGE_KEY: &str = "nft-demo-mint.settings";
