//! Core domain types for ticketscope
//!
//! Tickets move through two shapes:
//! - [`RawTicket`]: exactly what the ticket source returned (timestamps still strings)
//! - [`EnrichedTicket`]: the raw fields plus per-record derived metrics
//!
//! A [`TicketTable`] is the enriched batch that the cache holds and every
//! report is computed from.
//!
//! ## Terminology
//!
//! | Term | Definition |
//! |------|------------|
//! | **Status** | Free-text workflow label from the tracker ("In Progress", "Done") |
//! | **Status category** | Coarse bucket derived from the status ([`StatusCategory`]) |
//! | **Resolution time** | Whole days from creation to last update, for resolved tickets only |
//! | **Week start** | Monday of the ISO week a ticket was created in |

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Display name used when a ticket has no assignee.
pub const UNASSIGNED: &str = "Unassigned";

/// Priority label used when the tracker reports no priority.
pub const NO_PRIORITY: &str = "None";

// ============================================
// Raw tickets
// ============================================

/// A ticket as fetched from the tracker. Immutable once fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTicket {
    /// Tracker key (e.g. "OPS-123"), unique within a fetch
    pub key: String,
    /// One-line summary
    #[serde(default)]
    pub summary: String,
    /// Workflow status label
    pub status: String,
    /// Assignee display name, or [`UNASSIGNED`]
    #[serde(default = "default_assignee")]
    pub assignee: String,
    /// Project key
    pub project: String,
    /// Priority label, or [`NO_PRIORITY`]
    #[serde(default = "default_priority")]
    pub priority: String,
    /// Creation timestamp as sent by the source
    #[serde(default)]
    pub created: Option<String>,
    /// Last-update timestamp as sent by the source
    #[serde(default)]
    pub updated: Option<String>,
    /// Issue type name (Bug, Task, Story, ...)
    #[serde(default)]
    pub issue_type: Option<String>,
    /// Reporter display name
    #[serde(default)]
    pub reporter: Option<String>,
}

fn default_assignee() -> String {
    UNASSIGNED.to_string()
}

fn default_priority() -> String {
    NO_PRIORITY.to_string()
}

// ============================================
// Status categories
// ============================================

/// Coarse status bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StatusCategory {
    Resolved,
    Active,
    Pending,
    Other,
}

impl StatusCategory {
    /// Statuses that count as resolved.
    pub const RESOLVED_STATUSES: [&'static str; 4] = ["Done", "Closed", "Resolved", "Completed"];
    /// Statuses that count as actively worked on.
    pub const ACTIVE_STATUSES: [&'static str; 3] = ["In Progress", "Active", "Development"];
    /// Statuses that count as not yet started.
    pub const PENDING_STATUSES: [&'static str; 4] = ["To Do", "Open", "New", "Backlog"];

    /// Categorize a status label. Matching is exact.
    pub fn from_status(status: &str) -> Self {
        if Self::RESOLVED_STATUSES.contains(&status) {
            StatusCategory::Resolved
        } else if Self::ACTIVE_STATUSES.contains(&status) {
            StatusCategory::Active
        } else if Self::PENDING_STATUSES.contains(&status) {
            StatusCategory::Pending
        } else {
            StatusCategory::Other
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StatusCategory::Resolved => "Resolved",
            StatusCategory::Active => "Active",
            StatusCategory::Pending => "Pending",
            StatusCategory::Other => "Other",
        }
    }
}

impl fmt::Display for StatusCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Numeric weight of a priority label (Critical=5 .. Lowest=1, unknown=0).
pub fn priority_score(priority: &str) -> u8 {
    match priority {
        "Critical" => 5,
        "High" => 4,
        "Medium" => 3,
        "Low" => 2,
        "Lowest" => 1,
        _ => 0,
    }
}

// ============================================
// Calendar buckets
// ============================================

/// A calendar month, ordered chronologically and displayed as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "String")]
pub struct YearMonth {
    pub year: i32,
    /// 1-12
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl From<YearMonth> for String {
    fn from(ym: YearMonth) -> Self {
        ym.to_string()
    }
}

// ============================================
// Enriched tickets
// ============================================

/// A raw ticket plus its derived metrics.
///
/// Time-derived fields are `None` when the timestamp they come from is
/// missing or unparseable; the ticket itself is always kept.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedTicket {
    #[serde(flatten)]
    pub raw: RawTicket,
    /// Status is in [`StatusCategory::RESOLVED_STATUSES`]
    pub is_resolved: bool,
    /// `updated.date - created.date` in days; only for resolved tickets with
    /// both timestamps.
    ///
    /// This uses the last-update time as a stand-in for the resolution time,
    /// so a resolved ticket edited later reports a longer resolution.
    pub resolution_time_days: Option<i64>,
    pub status_category: StatusCategory,
    /// See [`priority_score`]
    pub priority_score: u8,
    /// Parsed `created`, normalized to UTC
    pub created_at: Option<DateTime<Utc>>,
    /// Parsed `updated`, normalized to UTC
    pub updated_at: Option<DateTime<Utc>>,
    pub created_date: Option<NaiveDate>,
    /// ISO week number (1-53)
    pub created_week: Option<u32>,
    pub created_month: Option<YearMonth>,
    pub created_year: Option<i32>,
    /// Monday of the ISO week containing `created`
    pub week_start: Option<NaiveDate>,
}

impl EnrichedTicket {
    pub fn key(&self) -> &str {
        &self.raw.key
    }

    pub fn assignee(&self) -> &str {
        &self.raw.assignee
    }

    pub fn project(&self) -> &str {
        &self.raw.project
    }

    pub fn status(&self) -> &str {
        &self.raw.status
    }

    pub fn priority(&self) -> &str {
        &self.raw.priority
    }

    /// Date of the last update, used as the resolution date.
    pub fn updated_date(&self) -> Option<NaiveDate> {
        self.updated_at.map(|ts| ts.date_naive())
    }
}

/// The enriched batch of tickets reports are computed from.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TicketTable {
    pub records: Vec<EnrichedTicket>,
}

impl TicketTable {
    pub fn new(records: Vec<EnrichedTicket>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EnrichedTicket> {
        self.records.iter()
    }
}

impl<'a> IntoIterator for &'a TicketTable {
    type Item = &'a EnrichedTicket;
    type IntoIter = std::slice::Iter<'a, EnrichedTicket>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_categories() {
        for status in StatusCategory::RESOLVED_STATUSES {
            assert_eq!(StatusCategory::from_status(status), StatusCategory::Resolved);
        }
        for status in StatusCategory::ACTIVE_STATUSES {
            assert_eq!(StatusCategory::from_status(status), StatusCategory::Active);
        }
        for status in StatusCategory::PENDING_STATUSES {
            assert_eq!(StatusCategory::from_status(status), StatusCategory::Pending);
        }
        assert_eq!(StatusCategory::from_status("In Review"), StatusCategory::Other);
        // Exact match only
        assert_eq!(StatusCategory::from_status("done"), StatusCategory::Other);
    }

    #[test]
    fn test_priority_score() {
        assert_eq!(priority_score("Critical"), 5);
        assert_eq!(priority_score("High"), 4);
        assert_eq!(priority_score("Medium"), 3);
        assert_eq!(priority_score("Low"), 2);
        assert_eq!(priority_score("Lowest"), 1);
        assert_eq!(priority_score("Blocker"), 0);
        assert_eq!(priority_score(NO_PRIORITY), 0);
    }

    #[test]
    fn test_year_month_display_and_order() {
        let dec = YearMonth::new(2023, 12);
        let jan = YearMonth::new(2024, 1);
        assert_eq!(dec.to_string(), "2023-12");
        assert_eq!(jan.to_string(), "2024-01");
        assert!(dec < jan);
        assert_eq!(serde_json::to_value(jan).unwrap(), "2024-01");
    }

    #[test]
    fn test_raw_ticket_defaults() {
        let json = r#"{"key": "OPS-1", "status": "Open", "project": "OPS"}"#;
        let ticket: RawTicket = serde_json::from_str(json).unwrap();
        assert_eq!(ticket.assignee, UNASSIGNED);
        assert_eq!(ticket.priority, NO_PRIORITY);
        assert!(ticket.created.is_none());
        assert!(ticket.summary.is_empty());
    }
}
