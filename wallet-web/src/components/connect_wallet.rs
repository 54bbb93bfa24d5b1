//! Connect Wallet Button
//!
//! Shows the connected account or a "Connect Wallet" prompt, and keeps the
//! wallet context in sync with the provider for as long as it is mounted.

use leptos::ev::MouseEvent;
use leptos::prelude::*;

use crate::services::WalletConnector;
use crate::state::wallet::use_wallet_context;

#[component]
pub fn ConnectWallet() -> impl IntoView {
    let wallet_ctx = use_wallet_context();
    let connector = WalletConnector::detect();

    if !connector.check_provider_available() {
        wallet_ctx.apply_provider_unavailable();
    }

    // Listener lives exactly as long as this component
    let subscription = StoredValue::new_local(
        connector
            .subscribe_to_account_changes(move |address| wallet_ctx.apply_accounts_changed(address))
            .ok(),
    );
    on_cleanup(move || {
        subscription.try_update_value(|subscription| {
            if let Some(subscription) = subscription.take() {
                subscription.unsubscribe();
            }
        });
    });

    if connector.check_provider_available() {
        // Pick up an account the user already authorized on a previous visit;
        // ignored if an event or a connect lands first
        leptos::task::spawn_local(async move {
            let result = connector.get_current_account().await;
            wallet_ctx.apply_current_account(result);
        });
    }

    let connect_wallet = move |_: MouseEvent| {
        leptos::task::spawn_local(async move {
            let result = WalletConnector::detect().request_account().await;
            wallet_ctx.apply_connect(result);
        });
    };

    view! {
        <button class="btn btn-secondary" on:click=connect_wallet>
            {move || wallet_ctx.label()}
        </button>
    }
}
