// src/batch/mod.rs
// =============================================================================
// Batch-level link checking.
//
// Submodules:
// - coordinator: fans every URL out to its own task under a global
//   concurrency ceiling, and collects the outcomes
// - aggregate: turns the outcomes of one request into success/failure counts
// - assemble: lines the counts up with the input requests, in input order
// =============================================================================

mod aggregate;
mod assemble;
mod coordinator;

pub use aggregate::aggregate;
pub use assemble::assemble;
pub use coordinator::BatchLinkCheckCoordinator;
