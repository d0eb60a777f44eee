use serde::Deserialize;

use super::constants::{
    DEFAULT_RECEIPT_POLL_INTERVAL_MS, DEFAULT_SUPPLY_REFRESH_INTERVAL_MS,
    MIN_RECEIPT_POLL_INTERVAL_MS, SETTINGS_STORAGE_KEY,
};

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub receipt_poll_interval_ms: u32,
    /// Give up waiting for a receipt after this many seconds. `None` waits forever.
    pub receipt_timeout_secs: Option<u64>,
    pub supply_refresh_interval_ms: u32,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            receipt_poll_interval_ms: DEFAULT_RECEIPT_POLL_INTERVAL_MS,
            receipt_timeout_secs: None,
            supply_refresh_interval_ms: DEFAULT_SUPPLY_REFRESH_INTERVAL_MS,
        }
    }
}

impl AppSettings {
    /// Parse stored settings. Missing fields take their defaults; invalid JSON yields `None`.
    pub fn from_json(value: &str) -> Option<Self> {
        match serde_json::from_str::<Self>(value) {
            Ok(settings) => Some(settings.normalized()),
            Err(e) => {
                log::warn!("Ignoring invalid stored settings: {}", e);
                None
            }
        }
    }

    fn normalized(mut self) -> Self {
        self.receipt_poll_interval_ms = self.receipt_poll_interval_ms.max(MIN_RECEIPT_POLL_INTERVAL_MS);
        self
    }

    /// Maximum number of receipt polls, if a timeout is configured
    pub fn max_receipt_polls(&self) -> Option<u64> {
        self.receipt_timeout_secs.map(|secs| {
            let interval = u64::from(self.receipt_poll_interval_ms.max(1));
            (secs * 1000).div_ceil(interval).max(1)
        })
    }

    #[cfg(target_arch = "wasm32")]
    fn local_storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|win| win.local_storage().ok().flatten())
    }

    /// Load settings from local storage, falling back to defaults
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        Self::local_storage()
            .and_then(|storage| storage.get_item(SETTINGS_STORAGE_KEY).ok().flatten())
            .and_then(|value| Self::from_json(&value))
            .unwrap_or_default()
    }

    /// Outside the browser there is no local storage; defaults apply
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        log::debug!("No local storage on this target, {} uses defaults", SETTINGS_STORAGE_KEY);
        Self::default()
    }
}
