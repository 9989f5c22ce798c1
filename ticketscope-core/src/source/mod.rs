//! Ticket sources
//!
//! A [`TicketSource`] hands the analytics engine raw tickets for a bounded
//! creation window. Implementations:
//! - [`JiraSource`]: Jira Cloud search API
//! - [`JsonFileSource`]: a JSON array of tickets on disk

mod file;
mod jira;

pub use file::JsonFileSource;
pub use jira::{JiraSource, FIELDS as JIRA_FIELDS};

use chrono::{Duration, NaiveDate};

use crate::error::Result;
use crate::types::RawTicket;

/// Ordering of returned tickets by creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    NewestFirst,
    OldestFirst,
}

impl SortOrder {
    fn jql(&self) -> &'static str {
        match self {
            SortOrder::NewestFirst => "DESC",
            SortOrder::OldestFirst => "ASC",
        }
    }
}

/// Which tickets to fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketQuery {
    /// Only tickets created on or after this date
    pub created_on_or_after: NaiveDate,
    pub order: SortOrder,
}

impl TicketQuery {
    /// Tickets created within `lookback_days` of `today`, newest first.
    ///
    /// A window reaching past the earliest representable date starts there.
    pub fn lookback(today: NaiveDate, lookback_days: u32) -> Self {
        Self {
            created_on_or_after: today
                .checked_sub_signed(Duration::days(i64::from(lookback_days)))
                .unwrap_or(NaiveDate::MIN),
            order: SortOrder::NewestFirst,
        }
    }

    /// Render as a JQL search.
    ///
    /// Generates: `created >= "2024-01-01" ORDER BY created DESC`
    pub fn to_jql(&self) -> String {
        format!(
            "created >= \"{}\" ORDER BY created {}",
            self.created_on_or_after.format("%Y-%m-%d"),
            self.order.jql()
        )
    }
}

/// Supplies raw tickets to the analytics engine.
///
/// `Ok(vec![])` means the window holds no tickets; `Err` means the source
/// could not be read. Callers treat the two differently.
pub trait TicketSource {
    fn search(&self, query: &TicketQuery) -> Result<Vec<RawTicket>>;
}

impl<T: TicketSource + ?Sized> TicketSource for Box<T> {
    fn search(&self, query: &TicketQuery) -> Result<Vec<RawTicket>> {
        (**self).search(query)
    }
}

impl<T: TicketSource + ?Sized> TicketSource for &T {
    fn search(&self, query: &TicketQuery) -> Result<Vec<RawTicket>> {
        (**self).search(query)
    }
}
