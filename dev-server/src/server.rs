//! # Server Setup
//!
//! Router assembly and HTTP server startup.
//!
//! Static files come from `dist_dir`; any path without a matching file gets
//! `index.html` so the single-page app can render it. The proxy middleware sits
//! in front of the static service and claims its prefix first.

use std::sync::Arc;

use axum::Router;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::ServerConfig;
use crate::error::ConfigError;
use crate::proxy::{proxy_requests, ProxyState};

/// Create the router: proxy middleware in front of static file hosting
pub fn create_router(config: &ServerConfig) -> Result<Router, ConfigError> {
    let proxy = Arc::new(ProxyState::new(config.proxy.clone())?);

    let index = config.dist_dir.join("index.html");
    let static_files = ServeDir::new(&config.dist_dir).fallback(ServeFile::new(index));

    let app = Router::new()
        .fallback_service(static_files)
        .layer(axum::middleware::from_fn_with_state(proxy, proxy_requests))
        .layer(TraceLayer::new_for_http());

    Ok(app)
}

/// Initialize and start the HTTP server
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the bind address is
/// unavailable.
pub async fn start_server(config: ServerConfig) -> anyhow::Result<()> {
    config.validate()?;
    let app = create_router(&config)?;

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;

    info!("Serving {} at http://{}", config.dist_dir.display(), config.bind_address);
    info!(
        "Proxying {}* -> {} (prefix stripped)",
        config.proxy.prefix, config.proxy.target
    );

    axum::serve(listener, app).await?;
    Ok(())
}
