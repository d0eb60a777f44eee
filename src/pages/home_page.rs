use dioxus::prelude::*;

use crate::app::MintContext;
use crate::components::{BackCard, ConnectButton, FlipCard, FrontCard, MintButton};

const NFT_IMAGE: &str = "/nft.png";

#[component]
pub fn HomePage() -> Element {
    let ctx = use_context::<MintContext>();

    let (minted_count, is_minted, error_message) = {
        let state = ctx.state.read();
        (
            state.minted_count(),
            state.is_minted(),
            state.error_message().map(str::to_string),
        )
    };

    rsx! {
        div { class: "page",
            div { class: "container",
                div { class: "intro",
                    h1 { "NFT Demo Mint" }
                    p { class: "minted-count", "{minted_count} minted so far!" }
                    ConnectButton {}

                    if let Some(message) = error_message {
                        p { class: "error-text", "Error: {message}" }
                    }

                    MintButton {}
                }

                div { class: "card-column",
                    FlipCard {
                        FrontCard { is_card_flipped: is_minted,
                            img { class: "nft-image", src: NFT_IMAGE, alt: "Demo NFT" }
                            h1 { "Rainbow NFT" }
                            ConnectButton {}
                        }
                        BackCard { is_card_flipped: is_minted,
                            MintedDetails {}
                        }
                    }
                }
            }
        }
    }
}

/// Back face content: links for the confirmed mint
#[component]
fn MintedDetails() -> Element {
    let ctx = use_context::<MintContext>();

    let (explorer_url, marketplace_url) = {
        let state = ctx.state.read();
        let explorer_url = state
            .transaction_hash()
            .map(|hash| ctx.network.explorer_tx_url(hash));
        let token_contract = state
            .confirmed_receipt()
            .and_then(|receipt| receipt.to.clone());
        (explorer_url, ctx.network.marketplace_asset_url(token_contract.as_deref()))
    };

    rsx! {
        div { class: "minted-details",
            img { class: "nft-thumb", src: NFT_IMAGE, alt: "Demo NFT", width: "80", height: "80" }
            h2 { "NFT Minted!" }
            p { "Your NFT will show up in your wallet in the next few minutes." }
            if let Some(url) = explorer_url {
                p { "View on " a { href: "{url}", "Etherscan" } }
            }
            p { "View on " a { href: "{marketplace_url}", "Opensea" } }
        }
    }
}
