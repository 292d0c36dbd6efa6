//! progress.snapshot.v1 definition

use crate::calendar::{is_valid_date_key, DEFAULT_PERIOD_DAYS};
use crate::types::{ActionCompletionRecord, ActionDefinition, CheckInRecord, ProgressSignal};
use serde::{Deserialize, Serialize};

/// Current schema version
pub const SCHEMA_VERSION: &str = "progress.snapshot.v1";

/// Inclusive range of a well-formed check-in value
pub const CHECK_IN_MIN: i32 = 1;
pub const CHECK_IN_MAX: i32 = 5;

fn default_schema_version() -> String {
    SCHEMA_VERSION.to_string()
}

fn default_period_days() -> usize {
    DEFAULT_PERIOD_DAYS
}

/// A consistent snapshot of a user's records for one analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    /// Schema version identifier
    #[serde(default = "default_schema_version")]
    pub schema_version: String,
    /// Requested period length in days
    #[serde(default = "default_period_days", alias = "periodDays")]
    pub period_days: usize,
    /// Caller-local civil date to anchor the period; local date when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub today: Option<String>,
    /// Currently configured actions
    #[serde(default)]
    pub actions: Vec<ActionDefinition>,
    /// Tracked progress signals
    #[serde(default)]
    pub signals: Vec<ProgressSignal>,
    /// Action completion logs
    #[serde(default, alias = "actionLogs")]
    pub action_logs: Vec<ActionCompletionRecord>,
    /// Check-in records for all signals
    #[serde(default, alias = "checkIns")]
    pub check_ins: Vec<CheckInRecord>,
}

impl Default for ProgressSnapshot {
    fn default() -> Self {
        Self::new(DEFAULT_PERIOD_DAYS)
    }
}

impl ProgressSnapshot {
    /// Create an empty snapshot for a period
    pub fn new(period_days: usize) -> Self {
        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            period_days,
            today: None,
            actions: Vec::new(),
            signals: Vec::new(),
            action_logs: Vec::new(),
            check_ins: Vec::new(),
        }
    }

    /// Anchor the period at a fixed date
    pub fn with_today(mut self, today: impl Into<String>) -> Self {
        self.today = Some(today.into());
        self
    }

    /// Check-ins belonging to one signal, in input order
    pub fn check_ins_for(&self, signal_id: &str) -> Vec<CheckInRecord> {
        self.check_ins
            .iter()
            .filter(|c| c.signal_id == signal_id)
            .cloned()
            .collect()
    }

    /// Report everything that does not match the schema.
    ///
    /// Validation never rewrites data. Records with malformed date keys fall
    /// outside every period axis and are ignored by the analytics anyway;
    /// out-of-range values are aggregated as given.
    pub fn validate(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        if self.schema_version != SCHEMA_VERSION {
            issues.push(ValidationIssue::InvalidSchemaVersion {
                expected: SCHEMA_VERSION.to_string(),
                actual: self.schema_version.clone(),
            });
        }

        if self.period_days == 0 {
            issues.push(ValidationIssue::EmptyPeriod);
        }

        if let Some(today) = &self.today {
            if !is_valid_date_key(today) {
                issues.push(ValidationIssue::MalformedToday(today.clone()));
            }
        }

        for (index, signal) in self.signals.iter().enumerate() {
            if signal.signal_id.trim().is_empty() {
                issues.push(ValidationIssue::EmptyIdentifier {
                    section: "signals",
                    index,
                });
            }
        }

        for (index, log) in self.action_logs.iter().enumerate() {
            if log.habit_id.trim().is_empty() {
                issues.push(ValidationIssue::EmptyIdentifier {
                    section: "action_logs",
                    index,
                });
            }
            if !is_valid_date_key(&log.date) {
                issues.push(ValidationIssue::MalformedDate {
                    section: "action_logs",
                    index,
                    date: log.date.clone(),
                });
            }
        }

        for (index, check_in) in self.check_ins.iter().enumerate() {
            if check_in.signal_id.trim().is_empty() {
                issues.push(ValidationIssue::EmptyIdentifier {
                    section: "check_ins",
                    index,
                });
            }
            if !is_valid_date_key(&check_in.date) {
                issues.push(ValidationIssue::MalformedDate {
                    section: "check_ins",
                    index,
                    date: check_in.date.clone(),
                });
            }
            if !(CHECK_IN_MIN..=CHECK_IN_MAX).contains(&check_in.value) {
                issues.push(ValidationIssue::ValueOutOfRange {
                    index,
                    value: check_in.value,
                });
            }
        }

        issues
    }
}

/// Schema problems found in a snapshot
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationIssue {
    #[error("Invalid schema version: expected {expected}, got {actual}")]
    InvalidSchemaVersion { expected: String, actual: String },

    #[error("Period length must be at least one day")]
    EmptyPeriod,

    #[error("Malformed today date key: {0}")]
    MalformedToday(String),

    #[error("Malformed date key in {section}[{index}]: {date}")]
    MalformedDate {
        section: &'static str,
        index: usize,
        date: String,
    },

    #[error("Check-in value out of range in check_ins[{index}]: {value} (expected 1-5)")]
    ValueOutOfRange { index: usize, value: i32 },

    #[error("Empty identifier in {section}[{index}]")]
    EmptyIdentifier { section: &'static str, index: usize },
}
