// Transport layer for daemon requests
//
// The client only needs one thing from the network: send a request, get back
// a status and a body. Anything below that (pooling, TLS, redirects) belongs
// to reqwest.

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, error};

use super::request::Request;
use super::response::RawResponse;

/// Sends one request and reports the raw outcome
///
/// Implementations never fail: a missing response is reported as status 0.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, base_url: &str, request: &Request) -> RawResponse;
}

/// reqwest-backed transport
///
/// No request timeout is set; a daemon that never answers leaves the call
/// pending.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a preconfigured reqwest client (proxies, TLS roots, ...)
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    /// Query values are form-encoded on the wire, so a space goes out as `+`
    async fn send(&self, base_url: &str, request: &Request) -> RawResponse {
        let url = format!("{}{}", base_url, request.path);
        debug!(method = %request.method, url = %url, query = ?request.query, "Sending request to gstd");

        let mut builder = self.client.request(request.method.into(), &url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => {
                log_transport_error(&e);
                return RawResponse::unreachable();
            }
        };

        let status = response.status().as_u16();
        match response.text().await {
            Ok(body) => {
                debug!(status, bytes = body.len(), "Received response from gstd");
                RawResponse::new(status, body)
            }
            Err(e) => {
                log_transport_error(&e);
                RawResponse::unreachable()
            }
        }
    }
}

fn log_transport_error(e: &reqwest::Error) {
    error!("HTTP request to gstd failed: {}", e);
    if e.is_timeout() {
        error!("  → Error type: TIMEOUT");
    } else if e.is_connect() {
        error!("  → Error type: CONNECTION");
    } else if e.is_request() {
        error!("  → Error type: REQUEST");
    } else if e.is_body() || e.is_decode() {
        error!("  → Error type: BODY");
    } else {
        error!("  → Error type: OTHER");
    }
}
