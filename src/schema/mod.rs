//! progress.snapshot.v1 schema
//!
//! The snapshot is the consistent set of records the data-fetching layer hands
//! to the engine on every update: catalog entries, action logs, check-ins and
//! the requested period.

mod adapter;
mod snapshot;

pub use adapter::*;
pub use snapshot::*;
