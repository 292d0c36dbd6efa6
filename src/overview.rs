//! Overview aggregation
//!
//! Day-level action completion statistics for a period.

use crate::calendar::DateAxis;
use crate::types::{ActionCompletionRecord, ActionDefinition, OverviewStats};
use std::collections::HashSet;
use tracing::debug;

/// Compute action presence and volume over the period.
///
/// Logs outside `axis` or not completed are ignored. `trend_summary` and
/// `trend_description` are left empty for the trend aggregator.
pub fn compute_overview(
    logs: &[ActionCompletionRecord],
    actions: &[ActionDefinition],
    period_length: usize,
    axis: &[String],
) -> OverviewStats {
    let axis = DateAxis::new(axis);

    let completed: Vec<&ActionCompletionRecord> = logs
        .iter()
        .filter(|log| log.completed && axis.contains(&log.date))
        .collect();

    let active_dates: HashSet<&str> = completed.iter().map(|log| log.date.as_str()).collect();
    let active_days = active_dates.len() as u32;

    let stats = OverviewStats {
        active_days,
        total_actions: completed.len() as u32,
        presence_ratio: presence_ratio(active_days, period_length),
        plan_load: actions.len() as u32,
        trend_summary: String::new(),
        trend_description: String::new(),
    };

    debug!(
        active_days = stats.active_days,
        total_actions = stats.total_actions,
        plan_load = stats.plan_load,
        "computed overview"
    );

    stats
}

/// Fraction of the period with at least one completed action
fn presence_ratio(active_days: u32, period_length: usize) -> f64 {
    if period_length == 0 {
        return 0.0;
    }
    active_days as f64 / period_length as f64
}
