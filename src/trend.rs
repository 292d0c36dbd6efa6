//! Signal trend classification
//!
//! Turns a signal's sparse check-ins over a period into coverage, half-period
//! trend, consecutive-sample variability, recent average and a trend label.
//! Series are kept as observed; missing days are never interpolated.

use crate::calendar::DateAxis;
use crate::types::{ChartPoint, CheckInRecord, ProgressSignal, SignalStat, TrendLabel};
use std::collections::HashSet;
use tracing::{debug, trace};

/// Minimum distinct check-in days before any trend is reported
pub const MIN_COVERAGE: u32 = 3;

/// Half-period delta above which a signal counts as improving
pub const TREND_THRESHOLD: f64 = 0.3;

/// Consecutive-change level above which a signal counts as irregular
pub const VARIABILITY_THRESHOLD: f64 = 0.6;

/// Number of trailing check-ins in the recent average
pub const RECENT_WINDOW: usize = 3;

/// Compute trend statistics for one signal over the period.
pub fn compute_signal_stat(
    signal: &ProgressSignal,
    check_ins: &[CheckInRecord],
    axis: &[String],
) -> SignalStat {
    let axis = DateAxis::new(axis);

    let mut filtered: Vec<&CheckInRecord> = check_ins
        .iter()
        .filter(|c| c.signal_id == signal.signal_id)
        .filter(|c| {
            let in_period = axis.contains(&c.date);
            if !in_period {
                trace!(signal_id = %c.signal_id, date = %c.date, "check-in outside period");
            }
            in_period
        })
        .collect();
    // Stable: same-day check-ins keep their input order
    filtered.sort_by(|a, b| a.date.cmp(&b.date));

    let coverage = filtered
        .iter()
        .map(|c| c.date.as_str())
        .collect::<HashSet<_>>()
        .len() as u32;

    let values: Vec<f64> = filtered.iter().map(|c| c.value as f64).collect();

    let trend_value = compute_half_trend(&filtered, &axis);
    let variability = compute_variability(&values);
    let recent_avg = compute_recent_avg(&values);
    let trend = classify(coverage, trend_value, variability);

    debug!(
        signal_id = %signal.signal_id,
        coverage,
        trend_value,
        variability,
        trend = trend.as_str(),
        "computed signal stat"
    );

    SignalStat {
        signal_id: signal.signal_id.clone(),
        name: signal.name.clone(),
        coverage,
        trend_value,
        variability,
        recent_avg,
        trend,
        status: trend.status_text().to_string(),
        chart_data: filtered
            .iter()
            .map(|c| ChartPoint {
                date: c.date.clone(),
                value: c.value,
            })
            .collect(),
        data_points: filtered.iter().map(|c| c.value).collect(),
    }
}

/// Classify a signal. First matching rule wins:
///
/// 1. `coverage < 3` → no pattern
/// 2. `trend > 0.3` and `variability <= 0.6` → improving
/// 3. `|trend| <= 0.3` → stable
/// 4. `variability > 0.6` → irregular
/// 5. anything else (a smooth negative trend) → stable
pub fn classify(coverage: u32, trend_value: f64, variability: f64) -> TrendLabel {
    if coverage < MIN_COVERAGE {
        TrendLabel::NoPattern
    } else if trend_value > TREND_THRESHOLD && variability <= VARIABILITY_THRESHOLD {
        TrendLabel::Improving
    } else if trend_value.abs() <= TREND_THRESHOLD {
        TrendLabel::Stable
    } else if variability > VARIABILITY_THRESHOLD {
        TrendLabel::Irregular
    } else {
        // No declining label exists; smooth negative trends read as stable.
        TrendLabel::Stable
    }
}

/// Second-half mean minus first-half mean; 0 when either half has no check-ins
fn compute_half_trend(check_ins: &[&CheckInRecord], axis: &DateAxis<'_>) -> f64 {
    let (first_half, second_half) = axis.halves();

    let first: Vec<f64> = check_ins
        .iter()
        .filter(|c| first_half.contains(c.date.as_str()))
        .map(|c| c.value as f64)
        .collect();
    let second: Vec<f64> = check_ins
        .iter()
        .filter(|c| second_half.contains(c.date.as_str()))
        .map(|c| c.value as f64)
        .collect();

    match (mean(&first), mean(&second)) {
        (Some(avg_first), Some(avg_second)) => avg_second - avg_first,
        _ => 0.0,
    }
}

/// Mean absolute difference between consecutive values
fn compute_variability(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let total: f64 = values.windows(2).map(|w| (w[1] - w[0]).abs()).sum();
    total / (values.len() - 1) as f64
}

/// Mean of the last `RECENT_WINDOW` values
fn compute_recent_avg(values: &[f64]) -> f64 {
    let start = values.len().saturating_sub(RECENT_WINDOW);
    mean(&values[start..]).unwrap_or(0.0)
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}
