//! UI Components

pub mod connect_wallet;
pub mod navbar;

pub use connect_wallet::ConnectWallet;
pub use navbar::Navbar;
