//! Per-assignee performance analytics.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::rollup::{largest_by, rollup_by, smallest_by, GroupTotals};
use crate::error::{Error, Result};
use crate::types::TicketTable;

/// Number of assignees in [`AssigneeAnalytics::top_assignees`].
pub const TOP_ASSIGNEES: usize = 10;
/// Number of assignees in each efficiency extreme.
pub const EFFICIENCY_LIST_LEN: usize = 5;
/// Minimum tickets before an assignee is ranked by efficiency.
pub const EFFICIENCY_MIN_TICKETS: i64 = 3;

/// Statistics for one assignee.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssigneeStats {
    pub assignee: String,
    pub total_tickets: i64,
    pub resolved_tickets: i64,
    /// Mean resolution time in days; `None` if nothing was resolved with timestamps
    pub avg_resolution_time: Option<f64>,
    pub avg_priority: f64,
    /// Resolved / total in percent, one decimal
    pub resolution_rate: f64,
}

impl From<GroupTotals> for AssigneeStats {
    fn from(group: GroupTotals) -> Self {
        Self {
            avg_resolution_time: group.avg_resolution_time(),
            avg_priority: group.avg_priority(),
            resolution_rate: group.resolved_pct(),
            total_tickets: group.total,
            resolved_tickets: group.resolved,
            assignee: group.name,
        }
    }
}

/// Assignee report.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AssigneeAnalytics {
    /// All assignees, busiest first
    pub assignee_stats: Vec<AssigneeStats>,
    pub top_assignees: Vec<AssigneeStats>,
    /// Highest resolution rate among assignees with enough tickets
    pub most_efficient: Vec<AssigneeStats>,
    /// Lowest resolution rate among assignees with enough tickets
    pub slowest_resolvers: Vec<AssigneeStats>,
}

impl AssigneeAnalytics {
    /// First assignee whose name contains `query`, ignoring case.
    pub fn find(&self, query: &str) -> Option<&AssigneeStats> {
        let needle = query.trim().to_lowercase();
        self.assignee_stats
            .iter()
            .find(|s| s.assignee.to_lowercase().contains(&needle))
    }

    /// Top `limit` assignees by `metric` (at least one is returned when any exist).
    ///
    /// `AvgResolutionTime` ranks fastest first and skips assignees without a
    /// mean; the other metrics rank highest first. No minimum ticket count applies.
    pub fn top_by(&self, metric: AssigneeMetric, limit: usize) -> Vec<AssigneeStats> {
        let limit = limit.max(1);
        match metric {
            AssigneeMetric::TotalTickets => {
                largest_by(&self.assignee_stats, limit, |s| s.total_tickets as f64)
            }
            AssigneeMetric::ResolvedTickets => {
                largest_by(&self.assignee_stats, limit, |s| s.resolved_tickets as f64)
            }
            AssigneeMetric::ResolutionRate => {
                largest_by(&self.assignee_stats, limit, |s| s.resolution_rate)
            }
            AssigneeMetric::AvgResolutionTime => {
                let timed: Vec<AssigneeStats> = self
                    .assignee_stats
                    .iter()
                    .filter(|s| s.avg_resolution_time.is_some())
                    .cloned()
                    .collect();
                smallest_by(&timed, limit, |s| s.avg_resolution_time.unwrap_or(f64::MAX))
            }
        }
    }

    /// Assignees with at least `min_tickets`, busiest first, capped at `limit`.
    pub fn performance(&self, min_tickets: i64, limit: usize) -> Vec<AssigneeStats> {
        self.assignee_stats
            .iter()
            .filter(|s| s.total_tickets >= min_tickets.max(0))
            .take(limit.max(1))
            .cloned()
            .collect()
    }
}

/// Metrics assignees can be ranked by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AssigneeMetric {
    TotalTickets,
    ResolvedTickets,
    ResolutionRate,
    AvgResolutionTime,
}

impl AssigneeMetric {
    pub const ALL: [AssigneeMetric; 4] = [
        AssigneeMetric::AvgResolutionTime,
        AssigneeMetric::ResolutionRate,
        AssigneeMetric::ResolvedTickets,
        AssigneeMetric::TotalTickets,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AssigneeMetric::TotalTickets => "total_tickets",
            AssigneeMetric::ResolvedTickets => "resolved_tickets",
            AssigneeMetric::ResolutionRate => "resolution_rate",
            AssigneeMetric::AvgResolutionTime => "avg_resolution_time",
        }
    }
}

impl fmt::Display for AssigneeMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssigneeMetric {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        AssigneeMetric::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| {
                let valid: Vec<&str> = AssigneeMetric::ALL.iter().map(|m| m.as_str()).collect();
                Error::InvalidParameter(format!(
                    "unknown metric '{}'; metric must be one of: {}",
                    s,
                    valid.join(", ")
                ))
            })
    }
}

/// Build the assignee report.
pub fn assignee_analytics(table: &TicketTable) -> AssigneeAnalytics {
    if table.is_empty() {
        return AssigneeAnalytics::default();
    }

    let assignee_stats: Vec<AssigneeStats> = rollup_by(table, |t| t.assignee())
        .into_iter()
        .map(AssigneeStats::from)
        .collect();

    let ranked: Vec<AssigneeStats> = assignee_stats
        .iter()
        .filter(|s| s.total_tickets >= EFFICIENCY_MIN_TICKETS)
        .cloned()
        .collect();

    AssigneeAnalytics {
        top_assignees: assignee_stats.iter().take(TOP_ASSIGNEES).cloned().collect(),
        most_efficient: largest_by(&ranked, EFFICIENCY_LIST_LEN, |s| s.resolution_rate),
        slowest_resolvers: smallest_by(&ranked, EFFICIENCY_LIST_LEN, |s| s.resolution_rate),
        assignee_stats,
    }
}

/// Look up one assignee by case-insensitive substring.
///
/// A blank query is rejected; `Ok(None)` means nobody matched.
pub fn assignee_detail(table: &TicketTable, query: &str) -> Result<Option<AssigneeStats>> {
    if query.trim().is_empty() {
        return Err(Error::InvalidParameter(
            "assignee query must not be empty".to_string(),
        ));
    }
    Ok(assignee_analytics(table).find(query).cloned())
}

/// Top assignees by a metric.
pub fn top_assignees_by(
    table: &TicketTable,
    metric: AssigneeMetric,
    limit: usize,
) -> Vec<AssigneeStats> {
    assignee_analytics(table).top_by(metric, limit)
}

/// Assignees with at least `min_tickets` tickets, busiest first.
pub fn assignee_performance(table: &TicketTable, min_tickets: i64, limit: usize) -> Vec<AssigneeStats> {
    assignee_analytics(table).performance(min_tickets, limit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::enrich::enrich;
    use crate::types::RawTicket;

    fn ticket(key: &str, assignee: &str, status: &str, created: &str, updated: &str) -> RawTicket {
        RawTicket {
            key: key.to_string(),
            summary: String::new(),
            status: status.to_string(),
            assignee: assignee.to_string(),
            project: "OPS".to_string(),
            priority: "High".to_string(),
            created: Some(created.to_string()),
            updated: Some(updated.to_string()),
            issue_type: None,
            reporter: None,
        }
    }

    fn team_table() -> TicketTable {
        enrich(&[
            // Amy: 3 tickets, 2 resolved (1 day, 3 days)
            ticket("A-1", "Amy Pond", "Done", "2024-01-01", "2024-01-02"),
            ticket("A-2", "Amy Pond", "Closed", "2024-01-01", "2024-01-04"),
            ticket("A-3", "Amy Pond", "Open", "2024-01-01", "2024-01-01"),
            // Bob: 4 tickets, 1 resolved (10 days)
            ticket("B-1", "Bob Smith", "Done", "2024-01-01", "2024-01-11"),
            ticket("B-2", "Bob Smith", "In Progress", "2024-01-01", "2024-01-02"),
            ticket("B-3", "Bob Smith", "To Do", "2024-01-01", "2024-01-02"),
            ticket("B-4", "Bob Smith", "Backlog", "2024-01-01", "2024-01-02"),
            // Cat: 2 tickets, both resolved same day
            ticket("C-1", "Cat", "Done", "2024-01-05", "2024-01-05"),
            ticket("C-2", "Cat", "Resolved", "2024-01-05", "2024-01-05"),
            // Dan: 1 ticket, nothing resolved
            ticket("D-1", "Dan", "Open", "2024-01-05", "2024-01-05"),
        ])
    }

    #[test]
    fn test_example_scenario() {
        let mut first = ticket("OPS-1", "Amy", "Done", "2024-01-01", "2024-01-05");
        first.priority = "High".to_string();
        let mut second = ticket("OPS-2", "Amy", "To Do", "2024-01-02", "2024-01-02");
        second.priority = "Low".to_string();

        let report = assignee_analytics(&enrich(&[first, second]));
        let amy = report.find("amy").unwrap();
        assert_eq!(amy.total_tickets, 2);
        assert_eq!(amy.resolved_tickets, 1);
        assert_eq!(amy.resolution_rate, 50.0);
        assert_eq!(amy.avg_resolution_time, Some(4.0));
        assert_eq!(amy.avg_priority, 3.0);
    }

    #[test]
    fn test_stats_sorted_by_total() {
        let report = assignee_analytics(&team_table());
        let names: Vec<&str> = report
            .assignee_stats
            .iter()
            .map(|s| s.assignee.as_str())
            .collect();
        assert_eq!(names, vec!["Bob Smith", "Amy Pond", "Cat", "Dan"]);

        let amy = &report.assignee_stats[1];
        assert_eq!(amy.resolution_rate, 66.7);
        assert_eq!(amy.avg_resolution_time, Some(2.0));

        let dan = &report.assignee_stats[3];
        assert_eq!(dan.avg_resolution_time, None);
        assert_eq!(dan.resolution_rate, 0.0);
        assert_eq!(report.top_assignees.len(), 4);
    }

    #[test]
    fn test_efficiency_lists_require_three_tickets() {
        let report = assignee_analytics(&team_table());

        let efficient: Vec<&str> = report
            .most_efficient
            .iter()
            .map(|s| s.assignee.as_str())
            .collect();
        assert_eq!(efficient, vec!["Amy Pond", "Bob Smith"]);

        let slowest: Vec<&str> = report
            .slowest_resolvers
            .iter()
            .map(|s| s.assignee.as_str())
            .collect();
        assert_eq!(slowest, vec!["Bob Smith", "Amy Pond"]);
    }

    #[test]
    fn test_top_by_avg_resolution_time_ignores_threshold() {
        let report = assignee_analytics(&team_table());
        let fastest = report.top_by(AssigneeMetric::AvgResolutionTime, 10);
        let names: Vec<&str> = fastest.iter().map(|s| s.assignee.as_str()).collect();
        // Cat has only 2 tickets but still ranks; Dan has no mean and is skipped
        assert_eq!(names, vec!["Cat", "Amy Pond", "Bob Smith"]);
    }

    #[test]
    fn test_top_by_descending_metrics() {
        let table = team_table();

        let by_rate = top_assignees_by(&table, AssigneeMetric::ResolutionRate, 2);
        assert_eq!(by_rate[0].assignee, "Cat");
        assert_eq!(by_rate[1].assignee, "Amy Pond");

        let by_resolved = top_assignees_by(&table, AssigneeMetric::ResolvedTickets, 1);
        assert_eq!(by_resolved.len(), 1);
        assert_eq!(by_resolved[0].assignee, "Amy Pond");

        // limit 0 is clamped to 1
        let by_total = top_assignees_by(&table, AssigneeMetric::TotalTickets, 0);
        assert_eq!(by_total.len(), 1);
        assert_eq!(by_total[0].assignee, "Bob Smith");
    }

    #[test]
    fn test_metric_parsing() {
        assert_eq!(
            "avg_resolution_time".parse::<AssigneeMetric>().unwrap(),
            AssigneeMetric::AvgResolutionTime
        );
        assert_eq!(
            " total_tickets ".parse::<AssigneeMetric>().unwrap(),
            AssigneeMetric::TotalTickets
        );

        let err = "velocity".parse::<AssigneeMetric>().unwrap_err();
        assert!(matches!(err, Error::InvalidParameter(_)));
        assert!(err.to_string().contains("resolution_rate"));
    }

    #[test]
    fn test_assignee_detail() {
        let table = team_table();
        let bob = assignee_detail(&table, "SMITH").unwrap().unwrap();
        assert_eq!(bob.assignee, "Bob Smith");
        assert_eq!(bob.total_tickets, 4);

        assert!(assignee_detail(&table, "zelda").unwrap().is_none());
        assert!(matches!(
            assignee_detail(&table, "  "),
            Err(Error::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_performance_filter() {
        let report = assignee_analytics(&team_table());
        let rows = report.performance(3, 25);
        assert_eq!(rows.len(), 2);
        assert_eq!(report.performance(1, 1).len(), 1);

        let names: Vec<String> = assignee_performance(&team_table(), 2, 25)
            .into_iter()
            .map(|s| s.assignee)
            .collect();
        assert_eq!(names, vec!["Bob Smith", "Amy Pond", "Cat"]);
    }

    #[test]
    fn test_empty_table() {
        let report = assignee_analytics(&TicketTable::default());
        assert!(report.assignee_stats.is_empty());
        assert!(report.find("amy").is_none());
        assert!(report.top_by(AssigneeMetric::TotalTickets, 5).is_empty());
    }
}
