// src/batch/aggregate.rs
// Folds the outcomes of one request into its FieldCheckStatus.

use crate::checker::LinkCheckOutcome;
use crate::model::{FieldCheckStatus, LinkCheckRequest};

/// Counts successes and failures for one request.
///
/// `outcomes` holds one entry per URL of `request`, in any order.
pub fn aggregate(request: &LinkCheckRequest, outcomes: &[LinkCheckOutcome]) -> FieldCheckStatus {
    debug_assert_eq!(request.urls().len(), outcomes.len());

    let succeeded_count = outcomes.iter().filter(|o| o.succeeded()).count();

    FieldCheckStatus {
        field_name: request.field_name(),
        succeeded_count,
        failed_count: outcomes.len() - succeeded_count,
    }
}
