//! Record and result types
//!
//! Inbound records are supplied by the data-fetching layer. Computed records are
//! plain data handed to the rendering layer; none of them hold references to
//! their inputs.

use serde::{Deserialize, Serialize};

/// One action marked done or undone on one calendar day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionCompletionRecord {
    /// Opaque action identifier
    #[serde(alias = "habitId")]
    pub habit_id: String,
    /// Calendar-day key (`YYYY-MM-DD`)
    pub date: String,
    /// Whether the action was completed that day
    pub completed: bool,
}

impl ActionCompletionRecord {
    pub fn new(habit_id: impl Into<String>, date: impl Into<String>, completed: bool) -> Self {
        Self {
            habit_id: habit_id.into(),
            date: date.into(),
            completed,
        }
    }
}

/// One subjective 1-5 rating of a progress signal on one calendar day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckInRecord {
    /// Catalog identifier of the signal kind
    #[serde(alias = "signalId")]
    pub signal_id: String,
    /// Calendar-day key (`YYYY-MM-DD`)
    pub date: String,
    /// Rating, expected in 1..=5 (not enforced)
    pub value: i32,
}

impl CheckInRecord {
    pub fn new(signal_id: impl Into<String>, date: impl Into<String>, value: i32) -> Self {
        Self {
            signal_id: signal_id.into(),
            date: date.into(),
            value,
        }
    }
}

/// Progress signal catalog entry as seen by the engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressSignal {
    /// Document identity of the user's signal instance
    pub id: String,
    /// Catalog identifier, used to correlate with check-ins
    #[serde(alias = "signalId")]
    pub signal_id: String,
    /// Display label
    pub name: String,
}

impl ProgressSignal {
    pub fn new(id: impl Into<String>, signal_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            signal_id: signal_id.into(),
            name: name.into(),
        }
    }
}

/// A configured action in the user's plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionDefinition {
    pub id: String,
    pub name: String,
}

impl ActionDefinition {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Categorical trend of a signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendLabel {
    Improving,
    Stable,
    Irregular,
    NoPattern,
}

impl TrendLabel {
    /// All labels, in tally order
    pub const ALL: [TrendLabel; 4] = [
        TrendLabel::Improving,
        TrendLabel::Stable,
        TrendLabel::Irregular,
        TrendLabel::NoPattern,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TrendLabel::Improving => "improving",
            TrendLabel::Stable => "stable",
            TrendLabel::Irregular => "irregular",
            TrendLabel::NoPattern => "no_pattern",
        }
    }

    /// Short status line shown next to a signal
    pub fn status_text(&self) -> &'static str {
        match self {
            TrendLabel::Improving => "Improving slowly.",
            TrendLabel::Stable => "Stable evolution.",
            TrendLabel::Irregular => "Irregular.",
            TrendLabel::NoPattern => "Still no clear pattern.",
        }
    }

    /// Longer sentence used when this label dominates the overview
    pub fn description(&self) -> &'static str {
        match self {
            TrendLabel::Improving => {
                "Your signals are moving in a good direction. Keep the rhythm going."
            }
            TrendLabel::Stable => {
                "Your signals are holding steady. Consistency is building a base."
            }
            TrendLabel::Irregular => {
                "Your signals vary a lot from day to day. Look for what changes on the harder days."
            }
            TrendLabel::NoPattern => {
                "Keep checking in for a few more days so a pattern can emerge."
            }
        }
    }
}

/// One observed point of a signal's sparse series
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub date: String,
    pub value: i32,
}

/// Per-signal trend statistics for a period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalStat {
    /// Catalog identifier of the signal
    pub signal_id: String,
    /// Display label
    pub name: String,
    /// Distinct days with at least one check-in
    pub coverage: u32,
    /// Second-half mean minus first-half mean (0 when a half is empty)
    pub trend_value: f64,
    /// Mean absolute change between consecutive check-ins
    pub variability: f64,
    /// Mean of the last three check-ins
    pub recent_avg: f64,
    /// Categorical trend
    pub trend: TrendLabel,
    /// Status line derived from `trend`
    pub status: String,
    /// Observed points in date order, unpadded
    pub chart_data: Vec<ChartPoint>,
    /// Observed values in date order, unpadded
    pub data_points: Vec<i32>,
}

/// Day-level action statistics for a period
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OverviewStats {
    /// Distinct days with at least one completed action
    pub active_days: u32,
    /// Completed action rows (volume, not presence)
    pub total_actions: u32,
    /// `active_days / period_length`
    pub presence_ratio: f64,
    /// Number of configured actions
    pub plan_load: u32,
    /// Filled in by the trend aggregator
    pub trend_summary: String,
    /// Filled in by the trend aggregator
    pub trend_description: String,
}

/// Dominant trend across all signals
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendSummary {
    pub label: TrendLabel,
    pub summary: String,
    pub description: String,
}

/// Descriptive comparison of a signal on days with and without actions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalRelation {
    /// Whether there was enough contrast to speak at all
    pub has_relation: bool,
    /// Explanatory text
    pub text: String,
    /// `avg_with - avg_without`
    pub delta: f64,
    /// Mean value on days with a completed action
    pub avg_with: f64,
    /// Mean value on days without a completed action
    pub avg_without: f64,
}

/// Producer metadata embedded in every report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportProducer {
    pub name: String,
    pub version: String,
}

/// The date axis a report covers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportPeriod {
    pub days: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
}

/// Relation estimate for one signal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationEntry {
    pub signal_id: String,
    pub name: String,
    pub relation: SignalRelation,
}

/// Everything the progress dashboard renders for one period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressReport {
    pub producer: ReportProducer,
    pub period: ReportPeriod,
    pub overview: OverviewStats,
    pub trend: TrendSummary,
    pub signals: Vec<SignalStat>,
    pub relations: Vec<RelationEntry>,
    /// Shown alongside relations; they are correlational only
    pub disclaimer: String,
}
