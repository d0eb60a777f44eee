use dioxus::prelude::*;

use crate::app::MintContext;
use crate::core::ethereum_wallet::EthereumWallet;
use crate::core::wallet::short_address;

#[component]
pub fn ConnectButton() -> Element {
    let ctx = use_context::<MintContext>();
    let mut connecting = use_signal(|| false);
    let mut error_msg = use_signal(|| None::<String>);

    let account = ctx.account.read().clone();

    if !EthereumWallet::is_installed() {
        return rsx! {
            p { class: "hint", "Install an Ethereum wallet extension to mint." }
        };
    }

    let connect = move |_| {
        let ctx = ctx.clone();
        connecting.set(true);
        error_msg.set(None);
        spawn(async move {
            match ctx.wallet.connect(ctx.network).await {
                Ok(account) => ctx.set_account(Some(account)),
                Err(e) => {
                    log::error!("Wallet connection failed: {}", e);
                    error_msg.set(Some(e.to_string()));
                }
            }
            connecting.set(false);
        });
    };

    rsx! {
        div { class: "connect-container",
            match account {
                Some(address) => rsx! {
                    button { class: "button connect-button connected", title: "{address}",
                        "{short_address(&address)}"
                    }
                },
                None => rsx! {
                    button {
                        class: "button connect-button",
                        disabled: *connecting.read(),
                        onclick: connect,
                        if *connecting.read() { "Connecting..." } else { "Connect Wallet" }
                    }
                },
            }
            if let Some(msg) = error_msg.read().as_ref() {
                p { class: "error-text", "{msg}" }
            }
        }
    }
}
