//! # Data Transfer Objects (DTOs)
//!
//! Payloads exchanged with the injected wallet provider.
//!
//! ## Module Organization
//!
//! - [`provider`] - EIP-1193 `request()` arguments and thrown RPC errors
//!
//! ## Example Provider Exchange
//!
//! ```text
//! ethereum.request({ "method": "eth_requestAccounts" })
//!   -> ["0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed"]
//!
//! ethereum.request({ "method": "eth_requestAccounts" })
//!   -> throws { "code": 4001, "message": "User rejected the request." }
//! ```

pub mod provider;

pub use provider::*;
