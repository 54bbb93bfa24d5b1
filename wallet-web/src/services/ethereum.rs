//! Injected Ethereum Provider via wasm-bindgen
//!
//! Bindings for the `window.ethereum` object MetaMask (and compatible wallets)
//! inject into the page.

use async_trait::async_trait;
use serde::Serialize;
use shared::{ProviderError, RequestArguments, RpcErrorPayload};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use super::wallet::{AccountsHandler, EthereumProvider, WalletConnector};
use crate::utils::constants::{ACCOUNTS_CHANGED_EVENT, PROVIDER_GLOBAL};

// ============================================================================
// JAVASCRIPT INTEROP
// ============================================================================

#[wasm_bindgen]
extern "C" {
    /// The EIP-1193 provider object
    #[wasm_bindgen(extends = js_sys::Object)]
    pub type Ethereum;

    #[wasm_bindgen(method, catch)]
    async fn request(this: &Ethereum, args: &JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(method)]
    fn on(this: &Ethereum, event: &str, handler: &js_sys::Function);

    #[wasm_bindgen(method, js_name = removeListener)]
    fn remove_listener(this: &Ethereum, event: &str, handler: &js_sys::Function);
}

/// Look up `window.ethereum`, if a wallet extension injected one
pub fn injected_ethereum() -> Option<Ethereum> {
    let window = web_sys::window()?;
    let value = js_sys::Reflect::get(&window, &JsValue::from_str(PROVIDER_GLOBAL)).ok()?;

    if value.is_undefined() || value.is_null() {
        return None;
    }

    Some(value.unchecked_into())
}

// ============================================================================
// PROVIDER
// ============================================================================

/// Browser wallet provider backed by `window.ethereum`
pub struct InjectedProvider {
    ethereum: Ethereum,
}

/// JS closure registered for `accountsChanged`; kept alive until removed
pub struct JsAccountsListener {
    closure: Closure<dyn Fn(JsValue)>,
}

impl InjectedProvider {
    pub fn detect() -> Option<Self> {
        injected_ethereum().map(|ethereum| Self { ethereum })
    }
}

impl WalletConnector<InjectedProvider> {
    /// Connector for whatever provider the page currently has
    pub fn detect() -> Self {
        WalletConnector::new(InjectedProvider::detect())
    }
}

#[async_trait(?Send)]
impl EthereumProvider for InjectedProvider {
    type Listener = JsAccountsListener;

    async fn request(&self, args: RequestArguments) -> Result<serde_json::Value, ProviderError> {
        let serializer = serde_wasm_bindgen::Serializer::json_compatible();
        let js_args = args
            .serialize(&serializer)
            .map_err(|e| ProviderError::RequestFailed(format!("Failed to encode request: {}", e)))?;

        let result = self.ethereum.request(&js_args).await.map_err(provider_error)?;

        serde_wasm_bindgen::from_value(result)
            .map_err(|e| ProviderError::RequestFailed(format!("Failed to decode response: {}", e)))
    }

    fn on_accounts_changed(&self, handler: AccountsHandler) -> JsAccountsListener {
        let closure = Closure::<dyn Fn(JsValue)>::new(move |accounts: JsValue| {
            match serde_wasm_bindgen::from_value::<Vec<String>>(accounts) {
                Ok(accounts) => handler(accounts),
                Err(e) => log::warn!("Unreadable accountsChanged payload: {}", e),
            }
        });

        self.ethereum
            .on(ACCOUNTS_CHANGED_EVENT, closure.as_ref().unchecked_ref());

        JsAccountsListener { closure }
    }

    fn remove_accounts_listener(&self, listener: JsAccountsListener) {
        self.ethereum
            .remove_listener(ACCOUNTS_CHANGED_EVENT, listener.closure.as_ref().unchecked_ref());
    }
}

/// Convert a value thrown by `request()` into a [`ProviderError`]
fn provider_error(err: JsValue) -> ProviderError {
    match serde_wasm_bindgen::from_value::<RpcErrorPayload>(err.clone()) {
        Ok(payload) => ProviderError::from_rpc(payload),
        Err(_) => {
            let message = err
                .dyn_ref::<js_sys::Error>()
                .map(|e| String::from(e.message()))
                .or_else(|| err.as_string())
                .unwrap_or_else(|| format!("{:?}", err));
            ProviderError::RequestFailed(message)
        }
    }
}
