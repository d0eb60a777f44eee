use dioxus::prelude::*;

#[component]
pub fn FlipCard(children: Element) -> Element {
    rsx! {
        div { class: "flip-card",
            div { class: "flip-card-inner", {children} }
        }
    }
}

/// Face shown until the mint is confirmed
#[component]
pub fn FrontCard(is_card_flipped: bool, children: Element) -> Element {
    rsx! {
        div {
            class: "flip-card-front",
            class: if is_card_flipped { "flipped" },
            {children}
        }
    }
}

/// Face shown once the mint is confirmed
#[component]
pub fn BackCard(is_card_flipped: bool, children: Element) -> Element {
    rsx! {
        div {
            class: "flip-card-back",
            class: if is_card_flipped { "flipped" },
            {children}
        }
    }
}
