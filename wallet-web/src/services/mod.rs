//! Wallet services

pub mod ethereum;
pub mod wallet;

pub use ethereum::InjectedProvider;
pub use wallet::{AccountsSubscription, EthereumProvider, WalletConnector};
