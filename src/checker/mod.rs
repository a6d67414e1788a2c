// src/checker/mod.rs
// =============================================================================
// Everything needed to check ONE URL.
//
// Submodules:
// - transport: sends a single HTTP request (reqwest), never follows redirects
// - redirect: follows redirect chains hop by hop, up to a cap
// - link: parses the URL, picks HEAD or GET, turns the answer into an outcome
//
// Batching, concurrency limits and reporting live in crate::batch.
// =============================================================================

mod link;
mod redirect;
mod transport;

#[cfg(test)]
pub(crate) mod scripted;

pub use link::{parse_http_url, FailureKind, LinkCheckOutcome, ResourceLinkChecker};
pub use redirect::{RedirectChainResolver, ResolveError, ResolvedResponse};
pub use transport::{CheckMethod, HopResponse, HttpTransport, Transport};
