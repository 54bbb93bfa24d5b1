//! # Wallet Domain Types
//!
//! The connected account and the errors a provider call can end in.
//!
//! [`WalletState`] is the single piece of UI state the connect widget owns. Its
//! `apply_*` transitions are where provider failures get logged and swallowed:
//! a failed call never changes the address, and nothing is cached beyond what the
//! provider last reported.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dto::provider::RpcErrorPayload;
use crate::utils::connect_button_label;

/// Hex digits in an account address, excluding the `0x` prefix
pub const ADDRESS_HEX_LEN: usize = 40;

// region:    --- Address

/// Account address, normalized to lowercase `0x`-prefixed hex.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(String);

impl Address {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("address must start with 0x")]
    MissingPrefix,

    #[error("address must have 40 hex digits, got {0}")]
    InvalidLength(usize),

    #[error("address contains non-hex characters")]
    InvalidHex,
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .ok_or(AddressError::MissingPrefix)?;

        if digits.len() != ADDRESS_HEX_LEN {
            return Err(AddressError::InvalidLength(digits.len()));
        }

        hex::decode(digits).map_err(|_| AddressError::InvalidHex)?;

        Ok(Self(format!("0x{}", digits.to_ascii_lowercase())))
    }
}

impl TryFrom<String> for Address {
    type Error = AddressError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Address> for String {
    fn from(address: Address) -> Self {
        address.0
    }
}

impl AsRef<str> for Address {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// endregion: --- Address

// region:    --- ProviderError

/// Ways a wallet provider call can fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// No injected provider object in the page
    #[error("no wallet provider found, please install MetaMask")]
    ProviderUnavailable,

    /// The permission prompt was declined
    #[error("user rejected the request")]
    UserRejected,

    /// Any other failure reported by, or decoding a reply from, the provider
    #[error("provider request failed: {0}")]
    RequestFailed(String),
}

impl ProviderError {
    /// Classify an error thrown by the provider's `request()`.
    pub fn from_rpc(payload: RpcErrorPayload) -> Self {
        if payload.is_user_rejection() {
            ProviderError::UserRejected
        } else {
            ProviderError::RequestFailed(format!("{} (code {})", payload.message, payload.code))
        }
    }
}

impl From<AddressError> for ProviderError {
    fn from(err: AddressError) -> Self {
        ProviderError::RequestFailed(format!("malformed account address: {}", err))
    }
}

impl From<serde_json::Error> for ProviderError {
    fn from(err: serde_json::Error) -> Self {
        ProviderError::RequestFailed(format!("unexpected provider response: {}", err))
    }
}

// endregion: --- ProviderError

// region:    --- WalletState

/// The connect widget's state: the account the provider last reported, if any.
///
/// A successful connect or an `accountsChanged` event is newer than any
/// `eth_accounts` read still in flight, so later passive reads are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalletState {
    address: Option<Address>,
    reported: bool,
}

impl WalletState {
    pub fn address(&self) -> Option<&Address> {
        self.address.as_ref()
    }

    pub fn is_connected(&self) -> bool {
        self.address.is_some()
    }

    /// Text for the connect button
    pub fn label(&self) -> String {
        connect_button_label(self.address.as_ref().map(Address::as_str))
    }

    /// Outcome of an explicit connect (`eth_requestAccounts`).
    pub fn apply_connect(&mut self, result: Result<Address, ProviderError>) {
        match result {
            Ok(address) => {
                log::info!("Wallet connected: {}", address);
                self.address = Some(address);
                self.reported = true;
            }
            Err(err) => log::error!("Wallet connect failed: {}", err),
        }
    }

    /// Outcome of the passive account read (`eth_accounts`).
    pub fn apply_current_account(&mut self, result: Result<Option<Address>, ProviderError>) {
        if self.reported {
            log::debug!("Ignoring stale eth_accounts reply");
            return;
        }

        match result {
            Ok(Some(address)) => {
                log::info!("Wallet already connected: {}", address);
                self.address = Some(address);
            }
            Ok(None) => log::info!("Connect to MetaMask using the Connect button"),
            Err(err) => log::error!("Reading current account failed: {}", err),
        }
    }

    /// Provider reported a new active account set; `None` means access was revoked.
    pub fn apply_accounts_changed(&mut self, address: Option<Address>) {
        match &address {
            Some(address) => log::info!("Active account changed: {}", address),
            None => log::info!("Wallet disconnected"),
        }
        self.address = address;
        self.reported = true;
    }

    pub fn apply_provider_unavailable(&mut self) {
        log::warn!("Please install MetaMask");
        self.address = None;
    }
}

// endregion: --- WalletState

#[cfg(test)]
mod tests {
    use super::*;

    const CHECKSUMMED: &str = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed";
    const LOWER: &str = "0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed";

    fn address(s: &str) -> Address {
        s.parse().unwrap()
    }

    #[test]
    fn test_address_normalizes_to_lowercase() {
        assert_eq!(address(CHECKSUMMED).as_str(), LOWER);
        assert_eq!(address("0X5AAEB6053F3E94C9B9A09F33669435E7EF1BEAED").as_str(), LOWER);
    }

    #[test]
    fn test_address_rejects_malformed() {
        assert_eq!(
            "5aaeb6053f3e94c9b9a09f33669435e7ef1beaed".parse::<Address>(),
            Err(AddressError::MissingPrefix)
        );
        assert_eq!("0x1234".parse::<Address>(), Err(AddressError::InvalidLength(4)));
        assert_eq!(
            "0xzzaeb6053f3e94c9b9a09f33669435e7ef1beaed".parse::<Address>(),
            Err(AddressError::InvalidHex)
        );
    }

    #[test]
    fn test_address_serde_as_string() {
        let parsed: Address = serde_json::from_value(serde_json::json!(CHECKSUMMED)).unwrap();
        assert_eq!(serde_json::to_value(&parsed).unwrap(), serde_json::json!(LOWER));
        assert!(serde_json::from_value::<Address>(serde_json::json!("0x12")).is_err());
    }

    #[test]
    fn test_from_rpc_classifies_rejection() {
        let rejected = RpcErrorPayload {
            code: 4001,
            message: "User rejected the request.".to_string(),
        };
        assert_eq!(ProviderError::from_rpc(rejected), ProviderError::UserRejected);

        let pending = RpcErrorPayload {
            code: -32002,
            message: "Request already pending".to_string(),
        };
        assert_eq!(
            ProviderError::from_rpc(pending),
            ProviderError::RequestFailed("Request already pending (code -32002)".to_string())
        );
    }

    #[test]
    fn test_failed_connect_leaves_state_empty() {
        let mut state = WalletState::default();
        state.apply_connect(Err(ProviderError::ProviderUnavailable));
        assert_eq!(state, WalletState::default());
        state.apply_connect(Err(ProviderError::UserRejected));
        assert!(!state.is_connected());
        assert_eq!(state.label(), "Connect Wallet");
    }

    #[test]
    fn test_failed_request_keeps_existing_address() {
        let mut state = WalletState::default();
        state.apply_connect(Ok(address(LOWER)));
        state.apply_current_account(Err(ProviderError::RequestFailed("boom".to_string())));
        state.apply_current_account(Ok(None));
        assert_eq!(state.address(), Some(&address(LOWER)));
    }

    #[test]
    fn test_accounts_changed_and_provider_loss() {
        let mut state = WalletState::default();
        state.apply_accounts_changed(Some(address(LOWER)));
        assert_eq!(state.label(), "Connected: 0x5aae...eaed");

        state.apply_accounts_changed(None);
        assert!(!state.is_connected());

        state.apply_provider_unavailable();
        assert_eq!(state.address(), None);
    }

    #[test]
    fn test_current_account_applies_before_any_report() {
        let mut state = WalletState::default();
        state.apply_current_account(Ok(Some(address(LOWER))));
        assert_eq!(state.address(), Some(&address(LOWER)));
    }

    #[test]
    fn test_late_current_account_does_not_override_newer_state() {
        const OTHER: &str = "0xfb6916095ca1df60bb79ce92ce3ea74c37c5d359";

        let mut revoked = WalletState::default();
        revoked.apply_accounts_changed(None);
        revoked.apply_current_account(Ok(Some(address(LOWER))));
        assert_eq!(revoked.address(), None);

        let mut connected = WalletState::default();
        connected.apply_connect(Ok(address(OTHER)));
        connected.apply_current_account(Ok(Some(address(LOWER))));
        assert_eq!(connected.address(), Some(&address(OTHER)));

        // A failed connect is not a report
        let mut rejected = WalletState::default();
        rejected.apply_connect(Err(ProviderError::UserRejected));
        rejected.apply_current_account(Ok(Some(address(LOWER))));
        assert_eq!(rejected.address(), Some(&address(LOWER)));
    }
}
