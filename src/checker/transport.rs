// src/checker/transport.rs
// =============================================================================
// One HTTP exchange, nothing more.
//
// The Transport trait is the seam between the checking logic and the network:
// it sends exactly one request and reports the status code and Location
// header. It never follows redirects (the RedirectChainResolver does that)
// and it never reads a body.
//
// HttpTransport is the real implementation on top of reqwest. Tests swap in
// a scripted transport so they can count calls and control timing.
// =============================================================================

use async_trait::async_trait;
use reqwest::{header::LOCATION, redirect::Policy, Client};
use std::time::Duration;
use url::Url;

use crate::config::CheckConfig;
use crate::error::{InitError, TransportError};

/// Request method used for a check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckMethod {
    Head,
    Get,
}

/// What one hop told us.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HopResponse {
    pub status: u16,
    /// Raw `Location` header, if present and valid UTF-8
    pub location: Option<String>,
}

impl HopResponse {
    pub fn new(status: u16) -> Self {
        Self {
            status,
            location: None,
        }
    }

    pub fn redirect(status: u16, location: impl Into<String>) -> Self {
        Self {
            status,
            location: Some(location.into()),
        }
    }
}

/// Sends a single request without following redirects.
///
/// Implementations must release whatever connection they used before
/// returning, on success and on error alike.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, method: CheckMethod, url: &Url) -> Result<HopResponse, TransportError>;
}

/// reqwest-backed transport.
pub struct HttpTransport {
    client: Client,
    read_timeout: Duration,
}

impl HttpTransport {
    pub fn new(config: &CheckConfig) -> Result<Self, InitError> {
        config.validate()?;

        // Redirects are counted by the resolver, so the client must not
        // follow them on its own. No idle pooling: a connection lives exactly
        // as long as the response that owns it.
        let client = Client::builder()
            .redirect(Policy::none())
            .connect_timeout(config.connect_timeout)
            .pool_max_idle_per_host(0)
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            read_timeout: config.read_timeout,
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, method: CheckMethod, url: &Url) -> Result<HopResponse, TransportError> {
        let request = match method {
            CheckMethod::Head => self.client.head(url.clone()),
            CheckMethod::Get => self.client.get(url.clone()),
        };

        // Per-request timeout runs from send(), so it also bounds connecting
        let response = request.timeout(self.read_timeout).send().await?;

        let status = response.status().as_u16();
        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);

        // Dropping the response unread closes its connection
        drop(response);

        Ok(HopResponse { status, location })
    }
}
