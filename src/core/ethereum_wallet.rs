use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo_timers::future::TimeoutFuture;
use gloo_utils::format::JsValueSerdeExt;
use js_sys::{Function, Object, Promise, Reflect};
use serde_json::json;
use tokio::sync::mpsc::UnboundedSender;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::window;

use super::contract::{decode_uint_word, mint_call_data, total_supply_call_data};
use super::network_config::NetworkConfig;
use super::settings::AppSettings;
use super::wallet::{Receipt, ReceiptTracker, TxHash, WalletError, WalletProvider};

/// EIP-1193 error code for a request the user rejected
const USER_REJECTED_CODE: f64 = 4001.0;

/// Injected browser wallet (`window.ethereum`) integration module
#[derive(Clone)]
pub struct EthereumWallet {
    account: Rc<RefCell<Option<String>>>,
    listening: Rc<Cell<bool>>,
    poll_interval_ms: u32,
    max_polls: Option<u64>,
}

impl EthereumWallet {
    pub fn new(settings: &AppSettings) -> Self {
        Self {
            account: Rc::new(RefCell::new(None)),
            listening: Rc::new(Cell::new(false)),
            poll_interval_ms: settings.receipt_poll_interval_ms,
            max_polls: settings.max_receipt_polls(),
        }
    }

    /// Check if an Ethereum wallet is injected into the page
    pub fn is_installed() -> bool {
        Self::provider().is_ok()
    }

    fn provider() -> Result<JsValue, WalletError> {
        let window = window().ok_or(WalletError::JavaScript("No window object".to_string()))?;
        let provider = Reflect::get(&window, &JsValue::from_str("ethereum"))
            .map_err(|e| WalletError::JavaScript(format!("Failed to get ethereum provider: {:?}", e)))?;

        if provider.is_undefined() || provider.is_null() {
            return Err(WalletError::NotInstalled);
        }
        Ok(provider)
    }

    /// Send one EIP-1193 `request` and await its promise
    async fn request(&self, method: &str, params: serde_json::Value) -> Result<JsValue, WalletError> {
        let provider = Self::provider()?;

        let request_func = Reflect::get(&provider, &JsValue::from_str("request"))
            .map_err(|e| WalletError::JavaScript(format!("Failed to get request function: {:?}", e)))?;
        if !request_func.is_function() {
            return Err(WalletError::JavaScript("request is not a function".to_string()));
        }

        let args = Object::new();
        let params = JsValue::from_serde(&params)
            .map_err(|e| WalletError::JavaScript(format!("Failed to encode params: {}", e)))?;
        Reflect::set(&args, &JsValue::from_str("method"), &JsValue::from_str(method))
            .map_err(|e| WalletError::JavaScript(format!("{:?}", e)))?;
        Reflect::set(&args, &JsValue::from_str("params"), &params)
            .map_err(|e| WalletError::JavaScript(format!("{:?}", e)))?;

        log::debug!("Wallet request: {}", method);

        let func = Function::from(request_func);
        let promise = func.call1(&provider, &args).map_err(Self::provider_error)?;
        JsFuture::from(Promise::from(promise))
            .await
            .map_err(Self::provider_error)
    }

    /// Map a rejected provider promise, keeping the provider's own message
    fn provider_error(error: JsValue) -> WalletError {
        let message = Reflect::get(&error, &JsValue::from_str("message"))
            .ok()
            .and_then(|m| m.as_string())
            .unwrap_or_else(|| format!("{:?}", error));
        let code = Reflect::get(&error, &JsValue::from_str("code"))
            .ok()
            .and_then(|c| c.as_f64());

        if code == Some(USER_REJECTED_CODE) {
            WalletError::Rejected(message)
        } else {
            WalletError::Rpc(message)
        }
    }

    fn decode<T: for<'de> serde::Deserialize<'de>>(value: &JsValue) -> Result<T, WalletError> {
        value
            .into_serde()
            .map_err(|e| WalletError::InvalidResponse(e.to_string()))
    }

    fn remember_account(&self, accounts: Vec<String>) -> Option<String> {
        let account = accounts.into_iter().next();
        *self.account.borrow_mut() = account.clone();
        account
    }

    /// Accounts already authorized for this page, without prompting
    pub async fn accounts(&self) -> Result<Option<String>, WalletError> {
        let result = self.request("eth_accounts", json!([])).await?;
        let accounts: Vec<String> = Self::decode(&result)?;
        Ok(self.remember_account(accounts))
    }

    /// Prompt the user to connect and return the selected account
    pub async fn connect(&self, network: &NetworkConfig) -> Result<String, WalletError> {
        let result = self.request("eth_requestAccounts", json!([])).await?;
        let accounts: Vec<String> = Self::decode(&result)?;
        let account = self.remember_account(accounts).ok_or(WalletError::NoAccount)?;

        match self.chain_id().await {
            Ok(chain_id) if !network.is_chain(&chain_id) => {
                log::warn!(
                    "Wallet is on chain {}, the mint contract lives on {} ({})",
                    chain_id,
                    network.display_name,
                    network.chain_id_hex()
                );
            }
            Ok(_) => {}
            Err(e) => log::warn!("Failed to read wallet chain id: {}", e),
        }

        log::info!("Connected account: {}", account);
        Ok(account)
    }

    pub async fn chain_id(&self) -> Result<String, WalletError> {
        let result = self.request("eth_chainId", json!([])).await?;
        Self::decode(&result)
    }

    /// Make sure the wallet signs on the deployment's chain, asking it to
    /// switch once if it is elsewhere
    async fn ensure_chain(&self, network: &NetworkConfig) -> Result<(), WalletError> {
        let actual = self.chain_id().await?;
        if network.is_chain(&actual) {
            return Ok(());
        }

        log::warn!("Asking wallet to switch from chain {} to {}", actual, network.display_name);
        let params = json!([{ "chainId": network.chain_id_hex() }]);
        match self.request("wallet_switchEthereumChain", params).await {
            Ok(_) => {}
            Err(WalletError::Rejected(msg)) => return Err(WalletError::Rejected(msg)),
            Err(e) => log::warn!("Chain switch failed: {}", e),
        }

        let actual = self.chain_id().await?;
        if network.is_chain(&actual) {
            Ok(())
        } else {
            Err(WalletError::WrongChain {
                expected: network.chain_id_hex(),
                actual,
            })
        }
    }

    /// Forward `accountsChanged` notifications. Subscribes at most once per wallet.
    pub fn watch_accounts(&self, sender: UnboundedSender<Option<String>>) -> Result<(), WalletError> {
        if self.listening.get() {
            return Ok(());
        }
        let provider = Self::provider()?;

        let on_func = Reflect::get(&provider, &JsValue::from_str("on"))
            .map_err(|e| WalletError::JavaScript(format!("Failed to get on function: {:?}", e)))?;
        if !on_func.is_function() {
            return Err(WalletError::JavaScript("on is not a function".to_string()));
        }

        let account = self.account.clone();
        let callback = Closure::<dyn FnMut(JsValue)>::new(move |accounts: JsValue| {
            let next = accounts
                .into_serde::<Vec<String>>()
                .ok()
                .and_then(|accounts| accounts.into_iter().next());
            *account.borrow_mut() = next.clone();
            if sender.send(next).is_err() {
                log::debug!("Account listener dropped");
            }
        });

        Function::from(on_func)
            .call2(&provider, &JsValue::from_str("accountsChanged"), callback.as_ref())
            .map_err(|e| WalletError::JavaScript(format!("{:?}", e)))?;

        // The provider keeps the listener for the lifetime of the page
        callback.forget();
        self.listening.set(true);
        Ok(())
    }
}

impl WalletProvider for EthereumWallet {
    fn current_account(&self) -> Option<String> {
        self.account.borrow().clone()
    }

    async fn read_total_minted(&self, network: &NetworkConfig) -> Result<u64, WalletError> {
        let params = json!([
            {
                "to": network.contract_address,
                "data": total_supply_call_data(),
            },
            "latest"
        ]);

        let result = self.request("eth_call", params).await?;
        let word: String = Self::decode(&result)?;
        decode_uint_word(&word).map_err(|e| WalletError::InvalidResponse(e.to_string()))
    }

    async fn submit_mint(&self, network: &NetworkConfig) -> Result<TxHash, WalletError> {
        let from = self.current_account().ok_or(WalletError::NoAccount)?;
        self.ensure_chain(network).await?;
        let params = json!([
            {
                "from": from,
                "to": network.contract_address,
                "data": mint_call_data(),
            }
        ]);

        log::info!("Sending mint transaction...");
        let result = self.request("eth_sendTransaction", params).await?;
        let hash: String = Self::decode(&result)?;
        Ok(TxHash::new(hash))
    }

    async fn wait_for_receipt(&self, hash: &TxHash) -> Result<Receipt, WalletError> {
        let mut tracker = ReceiptTracker::default();
        let mut polls = 0u64;
        loop {
            let result = self
                .request("eth_getTransactionReceipt", json!([hash.as_str()]))
                .await?;
            let receipt: serde_json::Value = Self::decode(&result)?;

            let transaction = if receipt.is_null() {
                let result = self
                    .request("eth_getTransactionByHash", json!([hash.as_str()]))
                    .await?;
                Self::decode(&result)?
            } else {
                serde_json::Value::Null
            };

            if let Some(settled) = tracker.observe(hash, &receipt, &transaction) {
                return settled;
            }

            polls += 1;
            if self.max_polls.is_some_and(|max| polls >= max) {
                return Err(WalletError::Timeout(hash.clone()));
            }
            log::debug!("Receipt for {} not available yet (poll {})", hash, polls);
            TimeoutFuture::new(self.poll_interval_ms).await;
        }
    }
}
