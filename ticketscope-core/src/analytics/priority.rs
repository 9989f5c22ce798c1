//! Priority analytics.

use std::collections::BTreeMap;

use serde::Serialize;

use super::crosstab::{value_counts, CrossTab, ValueCount};
use super::rollup::{mean, median};
use crate::types::TicketTable;

/// Resolution-time summary for one priority.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriorityResolution {
    pub priority: String,
    /// Mean resolution days; `None` when no ticket has a resolution time
    pub mean: Option<f64>,
    pub median: Option<f64>,
    /// Tickets with a resolution time
    pub count: i64,
}

/// Priority report.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PriorityAnalytics {
    /// Priority labels, most frequent first
    pub priority_distribution: Vec<ValueCount>,
    /// Project (rows) by priority (columns)
    pub priority_by_project: CrossTab,
    /// One entry per priority label, alphabetical
    pub priority_resolution_times: Vec<PriorityResolution>,
}

/// Build the priority report.
pub fn priority_analytics(table: &TicketTable) -> PriorityAnalytics {
    if table.is_empty() {
        return PriorityAnalytics::default();
    }

    let mut days_by_priority: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for ticket in table {
        let days = days_by_priority.entry(ticket.priority()).or_default();
        if let Some(d) = ticket.resolution_time_days {
            days.push(d as f64);
        }
    }

    PriorityAnalytics {
        priority_distribution: value_counts(table.iter().map(|t| t.priority())),
        priority_by_project: CrossTab::from_pairs(
            table.iter().map(|t| (t.project(), t.priority())),
        ),
        priority_resolution_times: days_by_priority
            .into_iter()
            .map(|(priority, days)| PriorityResolution {
                priority: priority.to_string(),
                mean: mean(&days),
                median: median(&days),
                count: days.len() as i64,
            })
            .collect(),
    }
}
