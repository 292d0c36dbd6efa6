//! Overview trend aggregation
//!
//! Reduces per-signal trend labels into one dominant label for the overview.

use crate::trend::MIN_COVERAGE;
use crate::types::{OverviewStats, SignalStat, TrendLabel, TrendSummary};
use tracing::debug;

/// Pick the dominant trend among signals with enough coverage.
///
/// Counts every label (zeros included) and sorts by count. A tie between the
/// top two resolves to `Stable`, whichever labels tied.
pub fn aggregate_trend(stats: &[SignalStat]) -> TrendSummary {
    let valid: Vec<&SignalStat> = stats.iter().filter(|s| s.coverage >= MIN_COVERAGE).collect();

    if valid.is_empty() {
        return summary_for(TrendLabel::NoPattern);
    }

    let mut tally: Vec<(TrendLabel, usize)> = TrendLabel::ALL
        .iter()
        .map(|label| (*label, valid.iter().filter(|s| s.trend == *label).count()))
        .collect();
    tally.sort_by(|a, b| b.1.cmp(&a.1));

    let label = if tally[0].1 == tally[1].1 {
        TrendLabel::Stable
    } else {
        tally[0].0
    };

    debug!(valid = valid.len(), ?tally, dominant = label.as_str(), "aggregated trend");

    summary_for(label)
}

/// Copy the aggregate into the overview's trend fields
pub fn apply_trend(overview: &mut OverviewStats, trend: &TrendSummary) {
    overview.trend_summary = trend.summary.clone();
    overview.trend_description = trend.description.clone();
}

fn summary_for(label: TrendLabel) -> TrendSummary {
    TrendSummary {
        label,
        summary: label.status_text().to_string(),
        description: label.description().to_string(),
    }
}
