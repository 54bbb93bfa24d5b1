//! Wallet state management

use leptos::prelude::*;
use shared::{Address, ProviderError, WalletState};

/// Global wallet context
#[derive(Clone, Copy)]
pub struct WalletContext {
    pub wallet: RwSignal<WalletState>,
}

impl WalletContext {
    pub fn new() -> Self {
        Self {
            wallet: RwSignal::new(WalletState::default()),
        }
    }

    pub fn label(&self) -> String {
        self.wallet.with(|state| state.label())
    }

    pub fn apply_connect(&self, result: Result<Address, ProviderError>) {
        self.wallet.update(|state| state.apply_connect(result));
    }

    pub fn apply_current_account(&self, result: Result<Option<Address>, ProviderError>) {
        self.wallet.update(|state| state.apply_current_account(result));
    }

    pub fn apply_accounts_changed(&self, address: Option<Address>) {
        // The app may already be torn down when a late event arrives
        self.wallet
            .try_update(|state| state.apply_accounts_changed(address));
    }

    pub fn apply_provider_unavailable(&self) {
        self.wallet.update(|state| state.apply_provider_unavailable());
    }
}

impl Default for WalletContext {
    fn default() -> Self {
        Self::new()
    }
}

pub fn provide_wallet_context() -> WalletContext {
    let context = WalletContext::new();
    provide_context(context);
    context
}

pub fn use_wallet_context() -> WalletContext {
    expect_context::<WalletContext>()
}
