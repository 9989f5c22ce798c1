//! Epic analytics.
//!
//! Epic membership is not part of the ticket records this crate receives, so
//! the report is always empty. It exists so consumers can rely on the shape.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::types::TicketTable;

/// Epic report.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EpicAnalytics {
    pub epic_count: i64,
    /// Epic key -> ticket keys
    pub epic_tickets: BTreeMap<String, Vec<String>>,
    /// Epic key -> percent complete
    pub epic_progress: BTreeMap<String, f64>,
}

/// Build the epic report (always empty).
pub fn epic_analytics(_table: &TicketTable) -> EpicAnalytics {
    EpicAnalytics::default()
}
