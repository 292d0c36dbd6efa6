//! Progress Flux - Deterministic progress analytics for habit tracking
//!
//! Flux turns sparse check-ins and action-completion logs into progress
//! insights through a pure pipeline: period calendar → overview aggregation →
//! signal trend classification → trend aggregation → action/signal relations.
//!
//! Every analytics function is synchronous, side-effect free and total: not
//! enough data yields sentinel results (`no_pattern`, `has_relation = false`,
//! zeros), never an error.

pub mod aggregate;
pub mod calendar;
pub mod error;
pub mod overview;
pub mod pipeline;
pub mod relation;
pub mod schema;
pub mod trend;
pub mod types;

// FFI bindings for C interop (always available for cdylib/staticlib builds)
pub mod ffi;

pub use aggregate::aggregate_trend;
pub use calendar::{dates_in_period, dates_in_period_ending};
pub use error::ComputeError;
pub use overview::compute_overview;
pub use pipeline::{build_report, snapshot_to_report_json, ProgressAnalyzer};
pub use relation::compute_relation;
pub use trend::compute_signal_stat;

// Schema exports
pub use schema::{
    parse_snapshot, ProgressSnapshot, SnapshotAdapter, ValidationIssue, SCHEMA_VERSION,
};

/// Flux version embedded in all reports
pub const FLUX_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name for reports
pub const PRODUCER_NAME: &str = "progress-flux";
