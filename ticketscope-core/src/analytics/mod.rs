//! Analytics module for ticketscope
//!
//! Turns raw tickets into an enriched table and computes reports over it:
//! - Overview counts and resolution rate
//! - Per-assignee and per-project rollups
//! - Creation and resolution trends
//! - Status and priority distributions
//!
//! Every report is a pure function of a [`TicketTable`](crate::types::TicketTable).
//! [`TicketAnalytics`] owns the source and the cached table and is the usual
//! entry point.

mod crosstab;
pub mod engine;
pub mod enrich;
mod rollup;

pub mod assignee;
pub mod epic;
pub mod overview;
pub mod priority;
pub mod project;
pub mod report;
pub mod status;
pub mod trend;

pub use engine::{AnalyticsSettings, CacheEntry, TicketAnalytics};
pub use enrich::{enrich, enrich_ticket, parse_timestamp, week_start};

pub use assignee::{
    assignee_analytics, assignee_detail, assignee_performance, top_assignees_by,
    AssigneeAnalytics, AssigneeMetric, AssigneeStats,
};
pub use crosstab::{value_counts, CrossTab, ValueCount};
pub use epic::{epic_analytics, EpicAnalytics};
pub use overview::{overview, OverviewMetrics};
pub use priority::{priority_analytics, PriorityAnalytics, PriorityResolution};
pub use project::{project_analytics, ProjectAnalytics, ProjectStats};
pub use report::ComprehensiveReport;
pub use status::{status_analytics, StatusAnalytics};
pub use trend::{trend_analytics, trend_direction, TrendAnalytics, TrendPoint, TrendSeries};
