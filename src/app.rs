use dioxus::prelude::*;
use gloo_timers::future::TimeoutFuture;
use tokio::sync::mpsc;

use crate::core::ethereum_wallet::EthereumWallet;
use crate::core::mint_state::{Effect, MintEvent, MintState};
use crate::core::network_config::NetworkConfig;
use crate::core::session::{connection_event, perform};
use crate::core::settings::AppSettings;
use crate::pages::HomePage;

const STYLE: &str = include_str!("../assets/style.css");

/// Everything a component needs to read or drive the mint coordinator
#[derive(Clone)]
pub struct MintContext {
    pub state: Signal<MintState>,
    pub account: Signal<Option<String>>,
    pub wallet: EthereumWallet,
    pub network: &'static NetworkConfig,
}

impl MintContext {
    /// Apply an event from a UI handler; any follow-up effect runs in a new task
    pub fn send(&self, event: MintEvent) {
        let mut state = self.state;
        let effect = state.write().apply(event);
        if let Some(effect) = effect {
            let ctx = self.clone();
            spawn(async move { ctx.drive(effect).await });
        }
    }

    /// Perform an effect and every effect that follows from it, in order
    pub async fn drive(&self, effect: Effect) {
        let mut next = Some(effect);
        while let Some(effect) = next.take() {
            let event = perform(&self.wallet, self.network, effect).await;
            let mut state = self.state;
            next = state.write().apply(event);
        }
    }

    /// Mirror a new account into the UI and the coordinator
    pub fn set_account(&self, account: Option<String>) {
        let mut signal = self.account;
        signal.set(account);
        let event = connection_event(&self.wallet);
        self.send(event);
    }

    pub fn mint(&self) {
        self.send(MintEvent::MintRequested);
    }
}

fn start_background_tasks(ctx: MintContext, supply_refresh_interval_ms: u32) {
    // Connection Observer: already-authorized account, then live changes
    let observer = ctx.clone();
    spawn(async move {
        match observer.wallet.accounts().await {
            Ok(account) => observer.set_account(account),
            Err(e) => {
                log::info!("Wallet not available: {}", e);
                observer.set_account(None);
            }
        }

        let (sender, mut receiver) = mpsc::unbounded_channel();
        if let Err(e) = observer.wallet.watch_accounts(sender) {
            log::warn!("Cannot watch wallet accounts: {}", e);
            return;
        }
        while let Some(account) = receiver.recv().await {
            log::info!("Wallet account changed");
            observer.set_account(account);
        }
    });

    // Supply Reader: on mount, then on a fixed cadence
    spawn(async move {
        loop {
            ctx.drive(Effect::RefreshSupply).await;
            TimeoutFuture::new(supply_refresh_interval_ms).await;
        }
    });
}

// main app component
#[component]
pub fn App() -> Element {
    let settings = use_hook(AppSettings::load);
    let state = use_signal(MintState::new);
    let account = use_signal(|| None::<String>);

    let ctx = use_context_provider(|| {
        let network = NetworkConfig::demo();
        log::info!("Minting on {} at {}", network.display_name, network.contract_address);
        MintContext {
            state,
            account,
            wallet: EthereumWallet::new(&settings),
            network,
        }
    });

    {
        let ctx = ctx.clone();
        let interval = settings.supply_refresh_interval_ms;
        use_hook(move || start_background_tasks(ctx, interval));
    }

    // Mount gate: effects run after the first render has been committed
    use_effect(move || {
        ctx.send(MintEvent::Mounted);
    });

    rsx! {
        document::Style { {STYLE} }
        HomePage {}
    }
}
