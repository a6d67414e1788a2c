// src/checker/link.rs
// =============================================================================
// Checks whether a single URL is reachable.
//
// How one check goes:
// 1. Parse the URL. Anything that is not an absolute http(s) URL with a host
//    fails as InvalidUrl, and no request is sent.
// 2. Send HEAD (cheap, no body) through the redirect resolver.
// 3. If the final HEAD answer is 405 or 501, the server does not do HEAD:
//    try once more with GET, on a fresh redirect chain.
// 4. Final status < 400 means success. Anything else is a failure, classified
//    as Timeout, TooManyRedirects or Unreachable.
//
// There are no retries here. One clean attempt keeps the latency of a check
// bounded by (hops + 1) * read_timeout, twice that with the GET fallback.
// =============================================================================

use log::debug;
use std::fmt;
use std::sync::Arc;
use url::Url;

use super::redirect::{RedirectChainResolver, ResolveError};
use super::transport::{CheckMethod, Transport};

// Answers meaning "I don't support HEAD" rather than "the resource is gone"
const HEAD_REJECTED_STATUSES: [u16; 2] = [405, 501];

/// Why a URL counts as failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// Refused, DNS failure, status >= 400, any I/O error
    Unreachable,
    /// Connect or response wait took too long
    Timeout,
    /// Redirect chain longer than allowed
    TooManyRedirects,
    /// Not an absolute http(s) URL; never sent
    InvalidUrl,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FailureKind::Unreachable => "unreachable",
            FailureKind::Timeout => "timeout",
            FailureKind::TooManyRedirects => "too many redirects",
            FailureKind::InvalidUrl => "invalid url",
        };
        f.write_str(name)
    }
}

/// The result of checking one URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkCheckOutcome {
    pub url: String,
    /// `None` on success
    pub failure: Option<FailureKind>,
    /// Human-readable detail, e.g. "HTTP 404"
    pub message: Option<String>,
    /// The failure did not look like ordinary network trouble
    pub unexpected: bool,
}

impl LinkCheckOutcome {
    pub fn success(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            failure: None,
            message: Some(message.into()),
            unexpected: false,
        }
    }

    pub fn failure(url: impl Into<String>, kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            failure: Some(kind),
            message: Some(message.into()),
            unexpected: false,
        }
    }

    /// An `Unreachable` failure caused by something other than the network.
    pub fn unexpected_failure(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            unexpected: true,
            ..Self::failure(url, FailureKind::Unreachable, message)
        }
    }

    pub fn succeeded(&self) -> bool {
        self.failure.is_none()
    }
}

/// Parses `raw` as an absolute http/https URL with a host.
pub fn parse_http_url(raw: &str) -> Result<Url, String> {
    let url = Url::parse(raw.trim()).map_err(|e| e.to_string())?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(format!("unsupported scheme '{}'", url.scheme()));
    }
    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(url),
        _ => Err("missing host".to_string()),
    }
}

pub struct ResourceLinkChecker {
    resolver: RedirectChainResolver,
}

impl ResourceLinkChecker {
    pub fn new(transport: Arc<dyn Transport>, max_redirects: usize) -> Self {
        Self {
            resolver: RedirectChainResolver::new(transport, max_redirects),
        }
    }

    /// Checks one URL. Never fails: every problem becomes a failed outcome.
    pub async fn check(&self, raw_url: &str) -> LinkCheckOutcome {
        let url = match parse_http_url(raw_url) {
            Ok(url) => url,
            Err(reason) => {
                debug!("Not checking '{}': {}", raw_url, reason);
                return LinkCheckOutcome::failure(raw_url, FailureKind::InvalidUrl, reason);
            }
        };

        let result = match self.resolver.resolve(CheckMethod::Head, url.clone()).await {
            Ok(resolved) if HEAD_REJECTED_STATUSES.contains(&resolved.status) => {
                debug!(
                    "HEAD answered {} for {}, retrying with GET",
                    resolved.status, raw_url
                );
                self.resolver.resolve(CheckMethod::Get, url).await
            }
            other => other,
        };

        match result {
            Ok(resolved) if resolved.status < 400 => {
                let message = if resolved.hops > 0 {
                    format!("HTTP {} after {} redirect(s)", resolved.status, resolved.hops)
                } else {
                    format!("HTTP {}", resolved.status)
                };
                LinkCheckOutcome::success(raw_url, message)
            }
            Ok(resolved) => LinkCheckOutcome::failure(
                raw_url,
                FailureKind::Unreachable,
                format!("HTTP {}", resolved.status),
            ),
            Err(error @ ResolveError::TooManyRedirects { .. }) => {
                LinkCheckOutcome::failure(raw_url, FailureKind::TooManyRedirects, error.to_string())
            }
            Err(ResolveError::Transport(error)) if error.is_timeout() => {
                LinkCheckOutcome::failure(raw_url, FailureKind::Timeout, error.to_string())
            }
            Err(ResolveError::Transport(error)) if !error.is_expected() => {
                LinkCheckOutcome::unexpected_failure(raw_url, error.to_string())
            }
            Err(ResolveError::Transport(error)) => {
                LinkCheckOutcome::failure(raw_url, FailureKind::Unreachable, error.to_string())
            }
            Err(error @ ResolveError::BadLocation { .. }) => {
                LinkCheckOutcome::failure(raw_url, FailureKind::Unreachable, error.to_string())
            }
        }
    }
}
