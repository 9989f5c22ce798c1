//! Status distribution analytics.

use serde::Serialize;

use super::crosstab::{value_counts, CrossTab, ValueCount};
use crate::types::TicketTable;

/// Status report.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StatusAnalytics {
    /// Raw status labels, most frequent first
    pub status_distribution: Vec<ValueCount>,
    /// Status categories, most frequent first
    pub status_category_distribution: Vec<ValueCount>,
    /// Status category (rows) by project (columns)
    pub status_flow: CrossTab,
    /// Number of distinct raw statuses
    pub status_count: usize,
}

/// Build the status report.
pub fn status_analytics(table: &TicketTable) -> StatusAnalytics {
    if table.is_empty() {
        return StatusAnalytics::default();
    }

    let status_distribution = value_counts(table.iter().map(|t| t.status()));

    StatusAnalytics {
        status_count: status_distribution.len(),
        status_category_distribution: value_counts(
            table.iter().map(|t| t.status_category.as_str()),
        ),
        status_flow: CrossTab::from_pairs(
            table
                .iter()
                .map(|t| (t.status_category.as_str(), t.project())),
        ),
        status_distribution,
    }
}
