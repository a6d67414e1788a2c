// src/checker/redirect.rs
// =============================================================================
// Follows redirect chains hop by hop, with a hard cap on the number of hops.
//
// The transport never follows redirects itself, so this is the one place that
// decides how far a chain may go. There is no loop detection: a loop like
// A -> B -> A simply runs into the cap.
//
// Hop counting: with max_redirects = N, the first N redirects are followed.
// The (N+1)th redirect response aborts the chain without sending another
// request.
// =============================================================================

use log::{trace, warn};
use std::sync::Arc;
use thiserror::Error;
use url::Url;

use super::link::parse_http_url;
use super::transport::{CheckMethod, Transport};
use crate::error::TransportError;

// Statuses that carry a Location worth following
const REDIRECT_STATUSES: [u16; 5] = [301, 302, 303, 307, 308];

/// The last response of a chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedResponse {
    pub final_url: Url,
    pub status: u16,
    /// Redirects followed to get here
    pub hops: usize,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("more than {max_redirects} redirect(s), last target {last_url}")]
    TooManyRedirects { max_redirects: usize, last_url: String },

    #[error("invalid redirect target '{location}' from {from}")]
    BadLocation { from: String, location: String },

    #[error(transparent)]
    Transport(#[from] TransportError),
}

pub struct RedirectChainResolver {
    transport: Arc<dyn Transport>,
    max_redirects: usize,
}

impl RedirectChainResolver {
    pub fn new(transport: Arc<dyn Transport>, max_redirects: usize) -> Self {
        Self {
            transport,
            max_redirects,
        }
    }

    pub fn max_redirects(&self) -> usize {
        self.max_redirects
    }

    /// Sends `method` to `start`, then follows redirects until a non-redirect
    /// response, a transport failure, or the hop cap.
    pub async fn resolve(
        &self,
        method: CheckMethod,
        start: Url,
    ) -> Result<ResolvedResponse, ResolveError> {
        let mut current = start;
        let mut hops = 0;

        loop {
            let response = self.transport.send(method, &current).await?;

            if !REDIRECT_STATUSES.contains(&response.status) {
                return Ok(ResolvedResponse {
                    final_url: current,
                    status: response.status,
                    hops,
                });
            }

            let Some(location) = response.location else {
                warn!(
                    "Redirect status {} for {} but no Location header",
                    response.status, current
                );
                return Ok(ResolvedResponse {
                    final_url: current,
                    status: response.status,
                    hops,
                });
            };

            if hops >= self.max_redirects {
                return Err(ResolveError::TooManyRedirects {
                    max_redirects: self.max_redirects,
                    last_url: current.to_string(),
                });
            }

            // Location may be relative to the hop that sent it, and must
            // land on another http(s) URL
            let next = current
                .join(&location)
                .ok()
                .and_then(|joined| parse_http_url(joined.as_str()).ok())
                .ok_or_else(|| ResolveError::BadLocation {
                    from: current.to_string(),
                    location: location.clone(),
                })?;

            hops += 1;
            trace!("Redirect {} {} -> {}", hops, current, next);
            current = next;
        }
    }
}
