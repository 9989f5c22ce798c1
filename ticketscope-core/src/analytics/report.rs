//! Every report computed over one table.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::assignee::{assignee_analytics, AssigneeAnalytics};
use super::epic::{epic_analytics, EpicAnalytics};
use super::overview::{overview, OverviewMetrics};
use super::priority::{priority_analytics, PriorityAnalytics};
use super::project::{project_analytics, ProjectAnalytics};
use super::status::{status_analytics, StatusAnalytics};
use super::trend::{trend_analytics, TrendAnalytics};
use crate::error::{Error, Result};
use crate::types::TicketTable;

/// Bundle of all reports plus the freshness of the data behind them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComprehensiveReport {
    pub overview: OverviewMetrics,
    pub assignees: AssigneeAnalytics,
    pub projects: ProjectAnalytics,
    pub trends: TrendAnalytics,
    pub status: StatusAnalytics,
    pub priority: PriorityAnalytics,
    pub epics: EpicAnalytics,
    /// When the underlying table was fetched
    pub data_freshness: Option<DateTime<Utc>>,
    pub total_records: usize,
}

impl ComprehensiveReport {
    /// Compute every report over `table`.
    ///
    /// An empty table yields [`Error::NoData`] rather than a report of zeros.
    pub fn from_table(table: &TicketTable, data_freshness: Option<DateTime<Utc>>) -> Result<Self> {
        if table.is_empty() {
            return Err(Error::NoData);
        }

        Ok(Self {
            overview: overview(table),
            assignees: assignee_analytics(table),
            projects: project_analytics(table),
            trends: trend_analytics(table),
            status: status_analytics(table),
            priority: priority_analytics(table),
            epics: epic_analytics(table),
            data_freshness,
            total_records: table.len(),
        })
    }
}
