//! Headline ticket counts.

use serde::Serialize;

use super::rollup::percentage;
use crate::types::{StatusCategory, TicketTable};

/// Overview metrics for the whole table.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OverviewMetrics {
    pub total_tickets: i64,
    pub active_tickets: i64,
    pub resolved_tickets: i64,
    pub pending_tickets: i64,
    /// Tickets whose status fits no category
    pub other_tickets: i64,
    /// Mean resolution days over tickets that have one; 0 when none do
    pub avg_resolution_time: f64,
    /// Resolved / total in percent
    pub resolution_rate: f64,
}

/// Build the overview.
pub fn overview(table: &TicketTable) -> OverviewMetrics {
    let mut metrics = OverviewMetrics::default();
    let (mut days_sum, mut days_count) = (0i64, 0i64);

    for ticket in table {
        metrics.total_tickets += 1;
        match ticket.status_category {
            StatusCategory::Active => metrics.active_tickets += 1,
            StatusCategory::Resolved => metrics.resolved_tickets += 1,
            StatusCategory::Pending => metrics.pending_tickets += 1,
            StatusCategory::Other => metrics.other_tickets += 1,
        }
        if let Some(days) = ticket.resolution_time_days {
            days_sum += days;
            days_count += 1;
        }
    }

    if days_count > 0 {
        metrics.avg_resolution_time = days_sum as f64 / days_count as f64;
    }
    metrics.resolution_rate = percentage(metrics.resolved_tickets, metrics.total_tickets);
    metrics
}
