// src/batch/assemble.rs
// Builds the final Report. Position i of the report always describes
// request i, whatever order the checks finished in.

use super::aggregate::aggregate;
use crate::checker::LinkCheckOutcome;
use crate::model::{LinkCheckRequest, Report};

/// Zips each request with its outcomes and aggregates them, in input order.
pub fn assemble(
    requests: &[LinkCheckRequest],
    per_request_outcomes: &[Vec<LinkCheckOutcome>],
) -> Report {
    debug_assert_eq!(requests.len(), per_request_outcomes.len());

    requests
        .iter()
        .zip(per_request_outcomes)
        .map(|(request, outcomes)| aggregate(request, outcomes))
        .collect()
}
