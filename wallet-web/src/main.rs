//! StakeHunt Wallet Web
//!
//! Browser app that connects to an injected MetaMask-compatible wallet and
//! shows the active account.

use leptos::prelude::*;
use wasm_bindgen::prelude::*;

pub mod app;
pub mod components;
pub mod services;
pub mod state;
pub mod utils;

use app::App;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());

    log::info!("StakeHunt wallet web starting");
    leptos::mount::mount_to_body(|| view! { <App/> });
}
