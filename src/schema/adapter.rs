//! Adapter for reading progress.snapshot.v1 documents

use crate::calendar::parse_date_key;
use crate::error::ComputeError;
use crate::schema::snapshot::ProgressSnapshot;
use chrono::{Local, NaiveDate};
use tracing::{debug, warn};

/// Adapter for turning snapshot JSON into typed snapshots
pub struct SnapshotAdapter;

impl SnapshotAdapter {
    /// Parse a snapshot. Schema problems are logged, not rejected.
    pub fn parse(json: &str) -> Result<ProgressSnapshot, ComputeError> {
        let snapshot: ProgressSnapshot = serde_json::from_str(json)?;

        let issues = snapshot.validate();
        for issue in &issues {
            warn!(%issue, "snapshot schema issue");
        }
        debug!(
            period_days = snapshot.period_days,
            signals = snapshot.signals.len(),
            action_logs = snapshot.action_logs.len(),
            check_ins = snapshot.check_ins.len(),
            issues = issues.len(),
            "parsed snapshot"
        );

        Ok(snapshot)
    }

    /// Parse a snapshot and reject it if validation reports any issue
    pub fn parse_strict(json: &str) -> Result<ProgressSnapshot, ComputeError> {
        let snapshot: ProgressSnapshot = serde_json::from_str(json)?;

        let issues = snapshot.validate();
        if let Some(first) = issues.first() {
            return Err(ComputeError::InvalidSnapshot(format!(
                "{} issue(s), first: {}",
                issues.len(),
                first
            )));
        }

        Ok(snapshot)
    }

    /// The date the period ends on: the snapshot's `today`, or the local date
    pub fn resolve_today(snapshot: &ProgressSnapshot) -> Result<NaiveDate, ComputeError> {
        match &snapshot.today {
            Some(key) => parse_date_key(key),
            None => Ok(Local::now().date_naive()),
        }
    }
}

/// Parse snapshot JSON leniently (see [`SnapshotAdapter::parse`])
pub fn parse_snapshot(json: &str) -> Result<ProgressSnapshot, ComputeError> {
    SnapshotAdapter::parse(json)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json() -> &'static str {
        r#"{
            "schema_version": "progress.snapshot.v1",
            "period_days": 7,
            "today": "2024-03-10",
            "actions": [{ "id": "walk", "name": "Walk" }],
            "signals": [{ "id": "doc-1", "signal_id": "energy", "name": "Energy" }],
            "action_logs": [{ "habit_id": "walk", "date": "2024-03-09", "completed": true }],
            "check_ins": [{ "signal_id": "energy", "date": "2024-03-09", "value": 4 }]
        }"#
    }

    #[test]
    fn test_parse() {
        let snapshot = SnapshotAdapter::parse(sample_json()).unwrap();

        assert_eq!(snapshot.period_days, 7);
        assert_eq!(snapshot.signals.len(), 1);
        assert_eq!(snapshot.check_ins[0].value, 4);
    }

    #[test]
    fn test_parse_snapshot() {
        let snapshot = parse_snapshot(sample_json()).unwrap();

        assert_eq!(snapshot, SnapshotAdapter::parse(sample_json()).unwrap());
        assert_eq!(snapshot.actions[0].id, "walk");
        assert!(matches!(parse_snapshot("{"), Err(ComputeError::JsonError(_))));
    }

    #[test]
    fn test_parse_invalid_json() {
        let result = SnapshotAdapter::parse("not valid json");
        assert!(matches!(result, Err(ComputeError::JsonError(_))));
    }

    #[test]
    fn test_parse_is_lenient_strict_is_not() {
        let json = r#"{ "period_days": 7, "check_ins": [
            { "signal_id": "energy", "date": "2024-03-09", "value": 9 }
        ] }"#;

        assert!(SnapshotAdapter::parse(json).is_ok());

        let strict = SnapshotAdapter::parse_strict(json);
        assert!(matches!(strict, Err(ComputeError::InvalidSnapshot(_))));
    }

    #[test]
    fn test_resolve_today() {
        let snapshot = SnapshotAdapter::parse(sample_json()).unwrap();
        let today = SnapshotAdapter::resolve_today(&snapshot).unwrap();
        assert_eq!(today, NaiveDate::from_ymd_opt(2024, 3, 10).unwrap());

        let mut snapshot = snapshot;
        snapshot.today = Some("March 10".to_string());
        assert!(matches!(
            SnapshotAdapter::resolve_today(&snapshot),
            Err(ComputeError::DateParseError(_))
        ));

        snapshot.today = None;
        assert!(SnapshotAdapter::resolve_today(&snapshot).is_ok());
    }
}
