//! # Shared Utility Functions
//!
//! Address formatting for the connect button.
//!
//! ## Address Formatting
//!
//! - [`truncate_address`] - Keep a prefix and everything from a fixed offset, joined by an ellipsis
//! - [`display_address`] - `truncate_address` with the 6 / 38 layout of a 42-character hex address
//! - [`connect_button_label`] - Button text for an optional connected address
//!
//! ## Usage
//!
//! ```rust
//! use shared::utils::display_address;
//!
//! let address = "0xfb6916095ca1df60bb79ce92ce3ea74c37c5d359";
//! assert_eq!(display_address(address), "0xfb69...d359");
//! assert_eq!(display_address(""), "Connect Wallet");
//! ```

/// Label shown while no account is connected
pub const CONNECT_WALLET_LABEL: &str = "Connect Wallet";

/// Prefix of the button text once an account is connected
pub const CONNECTED_PREFIX: &str = "Connected: ";

/// Characters kept at the start of a displayed address (`0x` plus four hex digits)
pub const DISPLAY_PREFIX_LEN: usize = 6;

/// Offset from which the tail of a displayed address is kept
pub const DISPLAY_SUFFIX_START: usize = 38;

/// Keep the first `prefix_len` characters and everything from `suffix_start` on,
/// joined by `...`.
///
/// Both bounds clamp to the address length, so short input never panics: the
/// prefix is the whole string and the tail is empty.
///
/// # Examples
///
/// ```rust
/// use shared::utils::truncate_address;
///
/// assert_eq!(truncate_address("0x1234567890123456789012345678901234567890", 6, 38), "0x1234...7890");
/// assert_eq!(truncate_address("0x12", 6, 38), "0x12...");
/// ```
pub fn truncate_address(address: &str, prefix_len: usize, suffix_start: usize) -> String {
    let prefix: String = address.chars().take(prefix_len).collect();
    let suffix: String = address.chars().skip(suffix_start).collect();

    format!("{}...{}", prefix, suffix)
}

/// Format an address for the connect button.
///
/// Empty input yields [`CONNECT_WALLET_LABEL`].
pub fn display_address(address: &str) -> String {
    if address.is_empty() {
        return CONNECT_WALLET_LABEL.to_string();
    }

    truncate_address(address, DISPLAY_PREFIX_LEN, DISPLAY_SUFFIX_START)
}

/// Full button text: `Connected: 0x1234...7890`, or [`CONNECT_WALLET_LABEL`].
pub fn connect_button_label(address: Option<&str>) -> String {
    match address {
        Some(address) if !address.is_empty() => {
            format!("{}{}", CONNECTED_PREFIX, display_address(address))
        }
        _ => CONNECT_WALLET_LABEL.to_string(),
    }
}
