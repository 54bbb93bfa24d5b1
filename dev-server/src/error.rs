//! # Error Types
//!
//! [`ConfigError`] fails startup; [`ProxyError`] becomes the error response
//! for the request that hit it: `413` for an oversized body, `502` otherwise.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} has an invalid value: {value}")]
    WrongFormat { name: &'static str, value: String },

    #[error("Invalid proxy prefix '{0}': must start with '/' and name a path")]
    InvalidProxyPrefix(String),

    #[error("Invalid proxy target '{0}': {1}")]
    InvalidProxyTarget(String, String),

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),
}

#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("Request body could not be read: {0}")]
    Body(axum::Error),

    #[error("Request body exceeds {0} bytes")]
    PayloadTooLarge(usize),

    #[error("Invalid upstream URL: {0}")]
    InvalidUrl(String),

    #[error("Upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),

    #[error("Upstream response could not be built: {0}")]
    Response(String),
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = match &self {
            ProxyError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            _ => StatusCode::BAD_GATEWAY,
        };

        (status, self.to_string()).into_response()
    }
}
