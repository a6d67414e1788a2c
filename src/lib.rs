//! metis-linkcheck: concurrent reachability checks for the web resources
//! referenced by metadata records.
//!
//! A batch is an ordered list of [`LinkCheckRequest`]s, each naming a
//! metadata field and the URLs found in it. [`BatchLinkCheckCoordinator`]
//! checks every URL under a global concurrency ceiling and returns one
//! [`FieldCheckStatus`] per request, in input order.
//!
//! ```no_run
//! use metis_linkcheck::{BatchLinkCheckCoordinator, CheckConfig, FieldName, LinkCheckRequest};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let coordinator = BatchLinkCheckCoordinator::new(&CheckConfig::default())?;
//! let requests = vec![LinkCheckRequest::new(
//!     FieldName::IsShownBy,
//!     vec!["https://www.europeana.eu".to_string()],
//! )];
//!
//! for status in coordinator.run_batch(&requests).await {
//!     println!("{}: {} ok, {} failed", status.field_name, status.succeeded_count, status.failed_count);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Unreachable URLs never make the batch fail; they only show up in
//! `failed_count`. The only errors are configuration and initialization errors,
//! reported before any request is sent.

pub mod batch;
pub mod checker;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;

pub use batch::BatchLinkCheckCoordinator;
pub use checker::{FailureKind, LinkCheckOutcome, ResourceLinkChecker, Transport};
pub use config::CheckConfig;
pub use error::{ConfigError, InitError, TransportError};
pub use model::{FieldCheckStatus, FieldName, LinkCheckRequest, Report};
