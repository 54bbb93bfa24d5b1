//! # Server Configuration
//!
//! Loaded from environment variables (after `.env`, if present), falling back to
//! the defaults below. Everything is validated before the server binds.
//!
//! | Variable          | Default                 |
//! |-------------------|-------------------------|
//! | `DEV_SERVER_ADDR` | `127.0.0.1:8080`        |
//! | `DIST_DIR`        | `dist`                  |
//! | `PROXY_PREFIX`    | `/recommend`            |
//! | `PROXY_TARGET`    | `http://127.0.0.1:5000` |
//! | `PROXY_SECURE`    | `false`                 |

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use reqwest::Url;

use crate::error::{ConfigError, Result};

/// Static file hosting plus one proxied path prefix
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1:8080")
    pub bind_address: String,
    /// Directory holding the built wasm bundle and `index.html`
    pub dist_dir: PathBuf,
    pub proxy: ProxyConfig,
}

/// Requests whose path starts with `prefix` go to `target` with the prefix removed
#[derive(Clone, Debug)]
pub struct ProxyConfig {
    pub prefix: String,
    pub target: String,
    /// Send the target's authority as `Host` instead of the client's
    pub change_origin: bool,
    /// Verify upstream TLS certificates
    pub secure: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".to_string(),
            dist_dir: PathBuf::from("dist"),
            proxy: ProxyConfig::default(),
        }
    }
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            prefix: "/recommend".to_string(),
            target: "http://127.0.0.1:5000".to_string(),
            change_origin: true,
            secure: false,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables and validate it.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let config = Self {
            bind_address: env_or("DEV_SERVER_ADDR", defaults.bind_address),
            dist_dir: env::var_os("DIST_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.dist_dir),
            proxy: ProxyConfig {
                prefix: env_or("PROXY_PREFIX", defaults.proxy.prefix),
                target: env_or("PROXY_TARGET", defaults.proxy.target),
                secure: env_parse_or("PROXY_SECURE", defaults.proxy.secure)?,
                ..defaults.proxy
            },
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        SocketAddr::from_str(&self.bind_address).map_err(|_| ConfigError::WrongFormat {
            name: "DEV_SERVER_ADDR",
            value: self.bind_address.clone(),
        })?;

        self.proxy.validate()
    }
}

impl ProxyConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.prefix.starts_with('/') || self.prefix.len() < 2 {
            return Err(ConfigError::InvalidProxyPrefix(self.prefix.clone()));
        }

        self.target_url().map(|_| ())
    }

    /// Parsed `target`; only http(s) URLs with a host are accepted
    pub fn target_url(&self) -> Result<Url> {
        let invalid = |reason: &str| ConfigError::InvalidProxyTarget(self.target.clone(), reason.to_string());

        let url = Url::parse(&self.target).map_err(|e| invalid(&e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid("scheme must be http or https"));
        }
        if url.host_str().is_none() {
            return Err(invalid("missing host"));
        }

        Ok(url)
    }
}

fn env_or(name: &'static str, default: String) -> String {
    env::var(name).unwrap_or(default)
}

fn env_parse_or<T: FromStr>(name: &'static str, default: T) -> Result<T> {
    match env::var(name) {
        Ok(value) => value
            .parse()
            .map_err(|_| ConfigError::WrongFormat { name, value }),
        Err(_) => Ok(default),
    }
}
