//! # Wallet Web Development Server
//!
//! Serves the compiled `wallet-web` bundle and forwards recommendation API
//! calls to the local recommendation service.
//!
//! - **[`config`]**: `ServerConfig` / `ProxyConfig`, loaded from the environment
//! - **[`proxy`]**: Prefix-stripping reverse proxy middleware
//! - **[`server`]**: Router assembly and startup
//!
//! ## Usage
//!
//! ```rust,no_run
//! use dev_server::{start_server, ServerConfig};
//!
//! # async fn run() -> anyhow::Result<()> {
//! start_server(ServerConfig::default()).await
//! # }
//! ```

pub mod config;
pub mod error;
pub mod proxy;
pub mod server;

pub use config::{ProxyConfig, ServerConfig};
pub use error::{ConfigError, ProxyError};
pub use server::{create_router, start_server};
