//! Action/signal relation estimation
//!
//! Compares a signal's mean value on days with any completed action against
//! days without one. The result is descriptive only: it never claims
//! causation, and it stays silent below a fixed sample floor or when one of the
//! two groups is empty.

use crate::calendar::DateAxis;
use crate::types::{ActionCompletionRecord, CheckInRecord, SignalRelation};
use std::collections::HashSet;
use tracing::debug;

/// Minimum in-period check-ins before any comparison is made
pub const MIN_RELATION_SAMPLES: usize = 4;

/// Delta at or above which the relation is reported as positive
pub const RELATION_DELTA_THRESHOLD: f64 = 0.3;

/// Shown with every relation by the caller
pub const CORRELATION_DISCLAIMER: &str =
    "This does not imply direct causation, only a possible relation.";

pub const NOT_ENOUGH_DATA_TEXT: &str =
    "Not enough data yet. Keep checking in to compare your days.";

pub const NEED_VARIETY_TEXT: &str =
    "Need more variety of days, with and without actions, to compare.";

pub const NO_CLEAR_IMPACT_TEXT: &str = "No clear impact observed yet.";

/// Estimate the relation between completing actions and one signal.
///
/// `signal_check_ins` must already be restricted to one signal. Action dates
/// are any day with a completed log, regardless of which action.
pub fn compute_relation(
    signal_check_ins: &[CheckInRecord],
    action_logs: &[ActionCompletionRecord],
    axis: &[String],
) -> SignalRelation {
    let axis = DateAxis::new(axis);

    let action_dates: HashSet<&str> = action_logs
        .iter()
        .filter(|log| log.completed)
        .map(|log| log.date.as_str())
        .collect();

    let valid: Vec<&CheckInRecord> = signal_check_ins
        .iter()
        .filter(|c| axis.contains(&c.date))
        .collect();

    if valid.len() < MIN_RELATION_SAMPLES {
        debug!(samples = valid.len(), "relation below sample floor");
        return SignalRelation {
            has_relation: false,
            text: NOT_ENOUGH_DATA_TEXT.to_string(),
            delta: 0.0,
            avg_with: 0.0,
            avg_without: 0.0,
        };
    }

    let (with_action, without_action): (Vec<&CheckInRecord>, Vec<&CheckInRecord>) = valid
        .iter()
        .copied()
        .partition(|c| action_dates.contains(c.date.as_str()));

    let avg_with = mean_value(&with_action);
    let avg_without = mean_value(&without_action);

    if with_action.is_empty() || without_action.is_empty() {
        debug!(
            with = with_action.len(),
            without = without_action.len(),
            "relation lacks contrast"
        );
        return SignalRelation {
            has_relation: false,
            text: NEED_VARIETY_TEXT.to_string(),
            delta: 0.0,
            avg_with,
            avg_without,
        };
    }

    let delta = avg_with - avg_without;
    // Negative deltas share the neutral text; there is no separate message.
    let text = if delta >= RELATION_DELTA_THRESHOLD {
        positive_text(delta)
    } else {
        NO_CLEAR_IMPACT_TEXT.to_string()
    };

    debug!(avg_with, avg_without, delta, "computed relation");

    SignalRelation {
        has_relation: true,
        text,
        delta,
        avg_with,
        avg_without,
    }
}

fn positive_text(delta: f64) -> String {
    format!("On days with completed actions, this signal averages {delta:+.1} points higher.")
}

fn mean_value(check_ins: &[&CheckInRecord]) -> f64 {
    if check_ins.is_empty() {
        return 0.0;
    }
    let sum: f64 = check_ins.iter().map(|c| c.value as f64).sum();
    sum / check_ins.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::dates_in_period_ending;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn axis(days: usize) -> Vec<String> {
        dates_in_period_ending(NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(), days)
    }

    fn check_ins(axis: &[String], values: &[i32]) -> Vec<CheckInRecord> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| CheckInRecord::new("energy", axis[i].clone(), *v))
            .collect()
    }

    fn done_on(dates: &[&String]) -> Vec<ActionCompletionRecord> {
        dates
            .iter()
            .map(|d| ActionCompletionRecord::new("walk", (*d).clone(), true))
            .collect()
    }

    #[test]
    fn test_full_contrast_positive_relation() {
        let axis = axis(10);
        let signal = check_ins(&axis, &[5, 1, 5, 1, 5, 1, 5, 1, 5, 1]);
        let action_days: Vec<&String> = axis.iter().step_by(2).collect();
        let logs = done_on(&action_days);

        let relation = compute_relation(&signal, &logs, &axis);

        assert!(relation.has_relation);
        assert_eq!(relation.avg_with, 5.0);
        assert_eq!(relation.avg_without, 1.0);
        assert_eq!(relation.delta, 4.0);
        assert_eq!(
            relation.text,
            "On days with completed actions, this signal averages +4.0 points higher."
        );
    }

    #[test]
    fn test_below_sample_floor() {
        let axis = axis(10);
        let signal = check_ins(&axis, &[5, 1, 5]);
        let logs = done_on(&[&axis[0]]);

        let relation = compute_relation(&signal, &logs, &axis);

        assert!(!relation.has_relation);
        assert_eq!(relation.text, NOT_ENOUGH_DATA_TEXT);
        assert_eq!(relation.delta, 0.0);
        assert_eq!(relation.avg_with, 0.0);
        assert_eq!(relation.avg_without, 0.0);
    }

    #[test]
    fn test_out_of_period_check_ins_do_not_count_toward_floor() {
        let axis = axis(5);
        let mut signal = check_ins(&axis, &[5, 1, 5]);
        signal.push(CheckInRecord::new("energy", "2023-12-31", 5));
        signal.push(CheckInRecord::new("energy", "bad-date", 5));
        let logs = done_on(&[&axis[0]]);

        let relation = compute_relation(&signal, &logs, &axis);

        assert!(!relation.has_relation);
        assert_eq!(relation.text, NOT_ENOUGH_DATA_TEXT);
    }

    #[test]
    fn test_no_action_days_needs_variety() {
        let axis = axis(7);
        let signal = check_ins(&axis, &[3, 4, 3, 4, 3]);

        let relation = compute_relation(&signal, &[], &axis);

        assert!(!relation.has_relation);
        assert_eq!(relation.text, NEED_VARIETY_TEXT);
        assert_eq!(relation.avg_with, 0.0);
        assert!((relation.avg_without - 3.4).abs() < 0.001);
    }

    #[test]
    fn test_every_day_active_needs_variety() {
        let axis = axis(4);
        let signal = check_ins(&axis, &[2, 3, 4, 5]);
        let all: Vec<&String> = axis.iter().collect();
        let logs = done_on(&all);

        let relation = compute_relation(&signal, &logs, &axis);

        assert!(!relation.has_relation);
        assert_eq!(relation.text, NEED_VARIETY_TEXT);
        assert!((relation.avg_with - 3.5).abs() < 0.001);
        assert_eq!(relation.avg_without, 0.0);
    }

    #[test]
    fn test_incomplete_logs_are_not_action_days() {
        let axis = axis(4);
        let signal = check_ins(&axis, &[2, 3, 4, 5]);
        let logs = vec![
            ActionCompletionRecord::new("walk", axis[0].clone(), false),
            ActionCompletionRecord::new("walk", axis[1].clone(), false),
        ];

        let relation = compute_relation(&signal, &logs, &axis);

        assert!(!relation.has_relation);
        assert_eq!(relation.text, NEED_VARIETY_TEXT);
    }

    #[test]
    fn test_small_delta_is_neutral() {
        let axis = axis(6);
        let signal = check_ins(&axis, &[3, 3, 3, 3, 4, 3]);
        let logs = done_on(&[&axis[0], &axis[4]]);

        let relation = compute_relation(&signal, &logs, &axis);

        // with: 3, 4 → 3.5; without: 3, 3, 3, 3 → 3.0
        assert!(relation.has_relation);
        assert!((relation.delta - 0.5).abs() < 0.001);
        assert!(relation.text.starts_with("On days with completed actions"));

        let logs = done_on(&[&axis[0], &axis[1]]);
        let relation = compute_relation(&signal, &logs, &axis);

        assert!(relation.has_relation);
        assert!(relation.delta.abs() < RELATION_DELTA_THRESHOLD);
        assert_eq!(relation.text, NO_CLEAR_IMPACT_TEXT);
    }

    #[test]
    fn test_negative_delta_uses_neutral_text() {
        let axis = axis(6);
        let signal = check_ins(&axis, &[1, 1, 5, 5, 5, 5]);
        let logs = done_on(&[&axis[0], &axis[1]]);

        let relation = compute_relation(&signal, &logs, &axis);

        assert!(relation.has_relation);
        assert!((relation.delta + 4.0).abs() < 0.001);
        assert_eq!(relation.text, NO_CLEAR_IMPACT_TEXT);
    }

    #[test]
    fn test_relation_uses_any_action() {
        let axis = axis(4);
        let signal = check_ins(&axis, &[5, 5, 1, 1]);
        let logs = vec![
            ActionCompletionRecord::new("walk", axis[0].clone(), true),
            ActionCompletionRecord::new("read", axis[1].clone(), true),
        ];

        let relation = compute_relation(&signal, &logs, &axis);

        assert!(relation.has_relation);
        assert_eq!(relation.avg_with, 5.0);
        assert_eq!(relation.avg_without, 1.0);
    }
}
