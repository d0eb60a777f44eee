pub mod constants;
pub mod contract;
pub mod mint_state;
pub mod mount;
pub mod network_config;
pub mod session;
pub mod settings;
pub mod wallet;

#[cfg(target_arch = "wasm32")]
pub mod ethereum_wallet;
