#![cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]

mod core;

#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
mod components;
#[cfg(target_arch = "wasm32")]
mod pages;

#[cfg(target_arch = "wasm32")]
fn main() {
    wasm_logger::init(wasm_logger::Config::new(log::Level::Info));
    log::info!("Starting NFT demo mint");
    dioxus::launch(app::App);
}

// The wallet lives in the browser, there is nothing to run natively
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    eprintln!("nft_demo_mint is a web app: build it for wasm32, e.g. `dx serve --platform web`");
}
