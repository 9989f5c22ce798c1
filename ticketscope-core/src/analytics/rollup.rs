//! Shared group-by arithmetic for the per-assignee and per-project reports.

use std::collections::BTreeMap;

use crate::types::{EnrichedTicket, StatusCategory, TicketTable};

/// Running totals for one group of tickets.
#[derive(Debug, Clone, Default)]
pub(crate) struct GroupTotals {
    pub name: String,
    pub total: i64,
    pub resolved: i64,
    resolution_days_sum: i64,
    resolution_days_count: i64,
    priority_sum: i64,
}

impl GroupTotals {
    fn add(&mut self, ticket: &EnrichedTicket) {
        self.total += 1;
        if ticket.status_category == StatusCategory::Resolved {
            self.resolved += 1;
        }
        if let Some(days) = ticket.resolution_time_days {
            self.resolution_days_sum += days;
            self.resolution_days_count += 1;
        }
        self.priority_sum += i64::from(ticket.priority_score);
    }

    /// Mean resolution time, `None` if no ticket in the group has one.
    pub fn avg_resolution_time(&self) -> Option<f64> {
        if self.resolution_days_count == 0 {
            None
        } else {
            Some(self.resolution_days_sum as f64 / self.resolution_days_count as f64)
        }
    }

    pub fn avg_priority(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.priority_sum as f64 / self.total as f64
        }
    }

    /// Resolved share in percent, rounded to one decimal.
    pub fn resolved_pct(&self) -> f64 {
        round1(percentage(self.resolved, self.total))
    }
}

/// Group tickets by `key_fn` and sort by ticket count, busiest first.
///
/// Ties are broken by group name so output is deterministic.
pub(crate) fn rollup_by<F>(table: &TicketTable, key_fn: F) -> Vec<GroupTotals>
where
    F: Fn(&EnrichedTicket) -> &str,
{
    let mut groups: BTreeMap<&str, GroupTotals> = BTreeMap::new();
    for ticket in table {
        let name = key_fn(ticket);
        groups
            .entry(name)
            .or_insert_with(|| GroupTotals {
                name: name.to_string(),
                ..Default::default()
            })
            .add(ticket);
    }

    // BTreeMap yields names ascending; the stable sort keeps that for ties.
    let mut rows: Vec<GroupTotals> = groups.into_values().collect();
    rows.sort_by(|a, b| b.total.cmp(&a.total));
    rows
}

/// `part / whole * 100`, or 0 when `whole` is 0.
pub(crate) fn percentage(part: i64, whole: i64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub(crate) fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

pub(crate) fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// First `n` items by `key` descending; ties keep their input order.
pub(crate) fn largest_by<T: Clone>(items: &[T], n: usize, key: impl Fn(&T) -> f64) -> Vec<T> {
    let mut sorted = items.to_vec();
    sorted.sort_by(|a, b| key(b).total_cmp(&key(a)));
    sorted.truncate(n);
    sorted
}

/// First `n` items by `key` ascending; ties keep their input order.
pub(crate) fn smallest_by<T: Clone>(items: &[T], n: usize, key: impl Fn(&T) -> f64) -> Vec<T> {
    let mut sorted = items.to_vec();
    sorted.sort_by(|a, b| key(a).total_cmp(&key(b)));
    sorted.truncate(n);
    sorted
}
