//! StakeHunt Wallet Web App - Leptos Frontend

use leptos::prelude::*;

use crate::components::Navbar;
use crate::state::wallet::provide_wallet_context;

#[component]
pub fn App() -> impl IntoView {
    provide_wallet_context();

    view! {
        <div class="app-container">
            <Navbar/>
        </div>
    }
}
