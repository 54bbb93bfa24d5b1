//! # Recommendation Proxy
//!
//! Middleware that forwards requests under a path prefix to an upstream
//! service, dropping the prefix: with the default config
//! `GET /recommend/items?x=1` becomes `GET http://127.0.0.1:5000/items?x=1`.
//!
//! Matching is a plain string prefix on the path, so `/recommendations`
//! is forwarded as `/ations`, same as the dev-server rule this replaces.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::extract::{Request, State};
use axum::http::header::{self, HeaderMap, HeaderName};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use http_body_util::LengthLimitError;
use reqwest::redirect::Policy;
use reqwest::Url;
use tracing::{debug, error, info};

use crate::config::ProxyConfig;
use crate::error::{ConfigError, ProxyError};

/// Largest request body forwarded upstream
pub(crate) const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Connection-scoped headers that must not be forwarded (RFC 9110 section 7.6.1)
const HOP_BY_HOP: [HeaderName; 7] = [
    header::CONNECTION,
    header::PROXY_AUTHENTICATE,
    header::PROXY_AUTHORIZATION,
    header::TE,
    header::TRAILER,
    header::TRANSFER_ENCODING,
    header::UPGRADE,
];

/// Strip `prefix` from the request target, keeping the query string.
///
/// Returns `None` when the target does not start with `prefix`. The result
/// always starts with `/`.
pub fn rewrite_path(prefix: &str, path_and_query: &str) -> Option<String> {
    let rest = path_and_query.strip_prefix(prefix)?;

    if rest.starts_with('/') {
        Some(rest.to_string())
    } else {
        Some(format!("/{}", rest))
    }
}

/// Shared proxy state: config plus a pooled HTTP client
pub struct ProxyState {
    config: ProxyConfig,
    target: Url,
    client: reqwest::Client,
}

impl ProxyState {
    pub fn new(config: ProxyConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let target = config.target_url()?;

        // Redirects go back to the browser untouched
        let client = reqwest::Client::builder()
            .redirect(Policy::none())
            .danger_accept_invalid_certs(!config.secure)
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(Self {
            config,
            target,
            client,
        })
    }

    pub fn matches(&self, path: &str) -> bool {
        path.starts_with(&self.config.prefix)
    }

    fn upstream_url(&self, rewritten: &str) -> Result<Url, ProxyError> {
        let base = self.target.as_str().trim_end_matches('/');
        Url::parse(&format!("{}{}", base, rewritten)).map_err(|e| ProxyError::InvalidUrl(e.to_string()))
    }

    /// Forward `req` upstream and relay the response.
    pub async fn forward(&self, req: Request) -> Result<Response, ProxyError> {
        let (parts, body) = req.into_parts();

        let path_and_query = parts
            .uri
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or("/");
        let rewritten = rewrite_path(&self.config.prefix, path_and_query)
            .ok_or_else(|| ProxyError::InvalidUrl(path_and_query.to_string()))?;
        let url = self.upstream_url(&rewritten)?;

        let mut headers = forwardable(&parts.headers);
        if self.config.change_origin {
            // reqwest fills in the target's authority
            headers.remove(header::HOST);
        }

        let body = to_bytes(body, MAX_BODY_BYTES).await.map_err(body_error)?;

        debug!(method = %parts.method, %url, "[PROXY] forwarding");
        let upstream = self
            .client
            .request(parts.method, url)
            .headers(headers)
            .body(body)
            .send()
            .await?;

        let status = upstream.status();
        let upstream_headers = forwardable(upstream.headers());
        let bytes = upstream.bytes().await?;

        let mut response = Response::builder().status(status);
        if let Some(headers) = response.headers_mut() {
            headers.extend(upstream_headers);
        }

        response
            .body(Body::from(bytes))
            .map_err(|e| ProxyError::Response(e.to_string()))
    }
}

fn body_error(err: axum::Error) -> ProxyError {
    let inner = err.into_inner();
    if inner.is::<LengthLimitError>() {
        ProxyError::PayloadTooLarge(MAX_BODY_BYTES)
    } else {
        ProxyError::Body(axum::Error::new(inner))
    }
}

/// Copy of `headers` without hop-by-hop headers or `Content-Length`,
/// which is recomputed for the re-buffered body.
fn forwardable(headers: &HeaderMap) -> HeaderMap {
    let mut headers = headers.clone();
    for name in HOP_BY_HOP.iter().chain([&header::CONTENT_LENGTH]) {
        headers.remove(name);
    }
    headers
}

/// Axum middleware: forward matching requests, pass everything else through.
pub async fn proxy_requests(
    State(proxy): State<Arc<ProxyState>>,
    req: Request,
    next: Next,
) -> Response {
    if !proxy.matches(req.uri().path()) {
        return next.run(req).await;
    }

    let path = req.uri().path().to_string();
    match proxy.forward(req).await {
        Ok(response) => {
            info!(path = %path, status = %response.status(), "[PROXY] upstream responded");
            response
        }
        Err(e) => {
            error!(path = %path, error = %e, "[PROXY] upstream request failed");
            e.into_response()
        }
    }
}
