//! Pipeline orchestration
//!
//! This module provides the public API for Progress Flux. It composes the
//! analytics stages in their documented order:
//! calendar → overview → signal stats → trend aggregate → relations.

use crate::aggregate::{aggregate_trend, apply_trend};
use crate::calendar::dates_in_period_ending;
use crate::error::ComputeError;
use crate::overview::compute_overview;
use crate::relation::{compute_relation, CORRELATION_DISCLAIMER};
use crate::schema::{ProgressSnapshot, SnapshotAdapter};
use crate::trend::compute_signal_stat;
use crate::types::{ProgressReport, RelationEntry, ReportPeriod, ReportProducer, SignalStat};
use crate::{FLUX_VERSION, PRODUCER_NAME};
use chrono::NaiveDate;
use tracing::{debug, info_span};

/// Build the full progress report for a snapshot, with the period ending at
/// `today`. Pure given its arguments.
pub fn build_report(snapshot: &ProgressSnapshot, today: NaiveDate) -> ProgressReport {
    let _span = info_span!("build_report", period_days = snapshot.period_days).entered();

    // Stage 1: Date axis
    let axis = dates_in_period_ending(today, snapshot.period_days);

    // Stage 2: Overview
    let mut overview = compute_overview(
        &snapshot.action_logs,
        &snapshot.actions,
        snapshot.period_days,
        &axis,
    );

    // Stage 3: Per-signal trend statistics
    let signals: Vec<SignalStat> = snapshot
        .signals
        .iter()
        .map(|signal| compute_signal_stat(signal, &snapshot.check_ins, &axis))
        .collect();

    // Stage 4: Dominant trend
    let trend = aggregate_trend(&signals);
    apply_trend(&mut overview, &trend);

    // Stage 5: Relations
    let relations: Vec<RelationEntry> = snapshot
        .signals
        .iter()
        .map(|signal| {
            let check_ins = snapshot.check_ins_for(&signal.signal_id);
            RelationEntry {
                signal_id: signal.signal_id.clone(),
                name: signal.name.clone(),
                relation: compute_relation(&check_ins, &snapshot.action_logs, &axis),
            }
        })
        .collect();

    debug!(
        signals = signals.len(),
        trend = trend.label.as_str(),
        "built progress report"
    );

    ProgressReport {
        producer: ReportProducer {
            name: PRODUCER_NAME.to_string(),
            version: FLUX_VERSION.to_string(),
        },
        period: ReportPeriod {
            days: snapshot.period_days,
            start: axis.first().cloned(),
            end: axis.last().cloned(),
        },
        overview,
        trend,
        signals,
        relations,
        disclaimer: CORRELATION_DISCLAIMER.to_string(),
    }
}

/// Convert snapshot JSON to report JSON (stateless, one-shot).
///
/// The period ends at the snapshot's `today`, or the local date when absent.
///
/// # Example
/// ```ignore
/// let report_json = snapshot_to_report_json(snapshot_json)?;
/// ```
pub fn snapshot_to_report_json(snapshot_json: String) -> Result<String, ComputeError> {
    ProgressAnalyzer::new().process(&snapshot_json)
}

/// Configured entry point for callers that analyze many snapshots.
///
/// Holds only configuration; every call is independent.
#[derive(Debug, Clone, Default)]
pub struct ProgressAnalyzer {
    period_days: Option<usize>,
    today: Option<NaiveDate>,
    pretty: bool,
    strict: bool,
}

impl ProgressAnalyzer {
    /// Create an analyzer that uses each snapshot's own settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the snapshot's period length
    pub fn with_period_days(mut self, days: usize) -> Self {
        self.period_days = Some(days);
        self
    }

    /// Anchor every period at a fixed date, overriding the snapshot
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// Pretty-print report JSON
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Reject snapshots with schema issues instead of analyzing them
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Period length applied to `snapshot`
    pub fn period_days_for(&self, snapshot: &ProgressSnapshot) -> usize {
        self.period_days.unwrap_or(snapshot.period_days)
    }

    /// Analyze a typed snapshot
    pub fn analyze(&self, snapshot: &ProgressSnapshot) -> Result<ProgressReport, ComputeError> {
        let today = match self.today {
            Some(today) => today,
            None => SnapshotAdapter::resolve_today(snapshot)?,
        };

        match self.period_days {
            Some(days) if days != snapshot.period_days => {
                let mut adjusted = snapshot.clone();
                adjusted.period_days = days;
                self.check_strict(&adjusted)?;
                Ok(build_report(&adjusted, today))
            }
            _ => {
                self.check_strict(snapshot)?;
                Ok(build_report(snapshot, today))
            }
        }
    }

    fn check_strict(&self, snapshot: &ProgressSnapshot) -> Result<(), ComputeError> {
        if !self.strict {
            return Ok(());
        }
        let issues = snapshot.validate();
        match issues.first() {
            Some(first) => Err(ComputeError::InvalidSnapshot(format!(
                "{} issue(s), first: {}",
                issues.len(),
                first
            ))),
            None => Ok(()),
        }
    }

    /// Parse snapshot JSON, analyze it and encode the report
    pub fn process(&self, snapshot_json: &str) -> Result<String, ComputeError> {
        let snapshot = if self.strict {
            SnapshotAdapter::parse_strict(snapshot_json)?
        } else {
            SnapshotAdapter::parse(snapshot_json)?
        };

        let report = self.analyze(&snapshot)?;
        self.encode(&report)
    }

    /// Encode a report to JSON
    pub fn encode(&self, report: &ProgressReport) -> Result<String, ComputeError> {
        let encoded = if self.pretty {
            serde_json::to_string_pretty(report)
        } else {
            serde_json::to_string(report)
        };
        encoded.map_err(|e| ComputeError::EncodingError(e.to_string()))
    }
}
