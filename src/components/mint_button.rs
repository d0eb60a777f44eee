use dioxus::prelude::*;

use crate::app::MintContext;
use crate::core::mint_state::TransactionOutcome;

#[component]
pub fn MintButton() -> Element {
    let ctx = use_context::<MintContext>();

    let (visible, disabled, loading, started, label) = {
        let state = ctx.state.read();
        let outcome = state.outcome();
        (
            state.shows_mint_trigger(),
            !state.can_mint(),
            matches!(outcome, TransactionOutcome::PendingApproval),
            matches!(outcome, TransactionOutcome::Submitted(_)),
            state.button_label(),
        )
    };

    if !visible {
        return rsx! {};
    }

    let on_mint = move |_| ctx.mint();

    rsx! {
        button {
            class: "button mint-button",
            disabled: disabled,
            "data-mint-loading": "{loading}",
            "data-mint-started": "{started}",
            onclick: on_mint,
            "{label}"
        }
    }
}
