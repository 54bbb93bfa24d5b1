//! Navigation Bar Component

use leptos::prelude::*;

use crate::components::ConnectWallet;
use crate::utils::constants::APP_TITLE;

#[component]
pub fn Navbar() -> impl IntoView {
    view! {
        <nav>
            <div style="max-width: 1200px; margin: 0 auto; padding: 0 24px; display: flex; justify-content: space-between; align-items: center;">
                <span class="nav-title">{APP_TITLE}</span>
                <ConnectWallet/>
            </div>
        </nav>
    }
}
