//! # Shared Wallet Types
//!
//! Provider-independent types used by `wallet-web` to talk to an injected
//! EIP-1193 wallet provider and to keep the connected account in UI state.
//!
//! ## Structure
//!
//! - **[`dto`]**: JSON-RPC request and error payloads exchanged with the provider
//!   - **[`dto::provider`]**: `RequestArguments`, `RpcMethod`, `RpcErrorPayload`
//! - **[`wallet`]**: `Address`, `WalletState`, and the `ProviderError` taxonomy
//! - **[`utils`]**: Address display formatting
//!   - **[`utils::display_address`]**: `0x1234...abcd` style truncation
//!   - **[`utils::connect_button_label`]**: The connect button text
//!
//! ## Wire Format
//!
//! Provider requests serialize to the object the provider's `request()` expects:
//!
//! ```rust
//! use shared::dto::provider::{RequestArguments, RpcMethod};
//!
//! let args = RequestArguments::new(RpcMethod::Accounts);
//! assert_eq!(serde_json::to_string(&args).unwrap(), r#"{"method":"eth_accounts"}"#);
//! ```
//!
//! ## Usage in Frontend
//!
//! ```rust
//! use shared::{Address, WalletState};
//!
//! let mut state = WalletState::default();
//! let address: Address = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed".parse().unwrap();
//! state.apply_accounts_changed(Some(address));
//! assert_eq!(state.label(), "Connected: 0x5aae...eaed");
//! ```

pub mod dto;
pub mod utils;
pub mod wallet;

pub use dto::*;
pub use utils::*;
pub use wallet::*;
