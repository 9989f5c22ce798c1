//! Project-level analytics.
//!
//! Same grouping as the assignee report, keyed by project, with the resolved
//! share reported as a completion rate.

use serde::Serialize;

use super::rollup::{largest_by, rollup_by, GroupTotals};
use crate::types::TicketTable;

/// Number of projects in [`ProjectAnalytics::most_active_projects`].
pub const MOST_ACTIVE_PROJECTS: usize = 10;
/// Number of projects in [`ProjectAnalytics::most_completed_projects`].
pub const MOST_COMPLETED_PROJECTS: usize = 5;

/// Statistics for a single project.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectStats {
    /// Project key
    pub project: String,
    pub total_tickets: i64,
    pub resolved_tickets: i64,
    pub avg_resolution_time: Option<f64>,
    pub avg_priority: f64,
    /// Resolved / total in percent, one decimal
    pub completion_rate: f64,
}

impl From<GroupTotals> for ProjectStats {
    fn from(group: GroupTotals) -> Self {
        Self {
            avg_resolution_time: group.avg_resolution_time(),
            avg_priority: group.avg_priority(),
            completion_rate: group.resolved_pct(),
            total_tickets: group.total,
            resolved_tickets: group.resolved,
            project: group.name,
        }
    }
}

/// Project report.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProjectAnalytics {
    /// All projects, busiest first
    pub project_stats: Vec<ProjectStats>,
    pub most_active_projects: Vec<ProjectStats>,
    pub most_completed_projects: Vec<ProjectStats>,
    /// Number of distinct projects
    pub project_count: usize,
}

impl ProjectAnalytics {
    /// Stats for a project key (exact match).
    pub fn get(&self, project: &str) -> Option<&ProjectStats> {
        self.project_stats.iter().find(|p| p.project == project)
    }
}

/// Build the project report.
pub fn project_analytics(table: &TicketTable) -> ProjectAnalytics {
    if table.is_empty() {
        return ProjectAnalytics::default();
    }

    let project_stats: Vec<ProjectStats> = rollup_by(table, |t| t.project())
        .into_iter()
        .map(ProjectStats::from)
        .collect();

    ProjectAnalytics {
        most_active_projects: project_stats
            .iter()
            .take(MOST_ACTIVE_PROJECTS)
            .cloned()
            .collect(),
        most_completed_projects: largest_by(&project_stats, MOST_COMPLETED_PROJECTS, |p| {
            p.completion_rate
        }),
        project_count: project_stats.len(),
        project_stats,
    }
}
