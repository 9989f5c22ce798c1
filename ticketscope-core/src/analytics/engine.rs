//! Read-through cache over a ticket source.
//!
//! ```text
//! ┌──────────────┐  search(query)  ┌─────────────────────────────────┐
//! │ TicketSource │ ◄────────────── │ TicketAnalytics                 │
//! │ (Jira, file) │ ──────────────► │  get_fresh_data(force_refresh)  │
//! └──────────────┘   raw tickets   │   ├─ fresh slot? return it      │
//!                                  │   └─ else fetch → enrich → swap │
//!                                  │                                 │
//!                                  │  reports(&TicketTable)          │
//!                                  └─────────────────────────────────┘
//! ```
//!
//! There is exactly one cache slot holding the whole enriched window. It is
//! replaced wholesale on refresh and never partially invalidated. Failed or
//! empty fetches leave the slot alone so the next call retries.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use ticketscope_core::analytics::TicketAnalytics;
//! use ticketscope_core::source::JsonFileSource;
//! use ticketscope_core::Config;
//!
//! let config = Config::default();
//! let mut analytics = TicketAnalytics::new(JsonFileSource::new("tickets.json"), &config.analytics);
//!
//! match analytics.generate_comprehensive_report(false) {
//!     Ok(report) => println!("{} tickets", report.total_records),
//!     Err(e) => println!("{}", e),
//! }
//! ```

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};

use super::enrich::enrich;
use super::report::ComprehensiveReport;
use crate::config::AnalyticsConfig;
use crate::error::Result;
use crate::source::{TicketQuery, TicketSource};
use crate::types::TicketTable;

/// The single cached table and when it was fetched.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub table: Arc<TicketTable>,
    pub fetched_at: DateTime<Utc>,
}

impl CacheEntry {
    /// Whether the entry is still within `ttl` at `now`.
    pub fn is_fresh(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        match now.signed_duration_since(self.fetched_at).to_std() {
            Ok(elapsed) => elapsed < ttl,
            // Fetched "in the future" (clock moved back): still fresh
            Err(_) => true,
        }
    }
}

/// How long a table stays fresh and how far back to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalyticsSettings {
    pub cache_duration: Duration,
    pub lookback_days: u32,
}

impl Default for AnalyticsSettings {
    fn default() -> Self {
        Self::from(&AnalyticsConfig::default())
    }
}

impl From<&AnalyticsConfig> for AnalyticsSettings {
    fn from(config: &AnalyticsConfig) -> Self {
        Self {
            cache_duration: config.cache_duration(),
            lookback_days: config.lookback_days,
        }
    }
}

/// Freshness controller and report entry point.
pub struct TicketAnalytics<S> {
    source: S,
    settings: AnalyticsSettings,
    cache: Option<CacheEntry>,
}

impl<S: TicketSource> TicketAnalytics<S> {
    pub fn new(source: S, settings: impl Into<AnalyticsSettings>) -> Self {
        Self {
            source,
            settings: settings.into(),
            cache: None,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn settings(&self) -> &AnalyticsSettings {
        &self.settings
    }

    /// When the cached table was fetched, if there is one.
    pub fn cache_timestamp(&self) -> Option<DateTime<Utc>> {
        self.cache.as_ref().map(|entry| entry.fetched_at)
    }

    /// Drop the cached table.
    pub fn invalidate(&mut self) {
        self.cache = None;
    }

    /// Return the cached table if fresh, otherwise fetch and enrich a new one.
    ///
    /// Source failures and empty results yield an empty table and leave the
    /// cache untouched.
    pub fn get_fresh_data(&mut self, force_refresh: bool) -> Arc<TicketTable> {
        self.get_fresh_data_at(force_refresh, Utc::now())
    }

    /// [`get_fresh_data`](Self::get_fresh_data) with an explicit current time.
    pub fn get_fresh_data_at(&mut self, force_refresh: bool, now: DateTime<Utc>) -> Arc<TicketTable> {
        if !force_refresh {
            if let Some(entry) = &self.cache {
                if entry.is_fresh(now, self.settings.cache_duration) {
                    tracing::debug!(
                        fetched_at = %entry.fetched_at,
                        records = entry.table.len(),
                        "Ticket cache hit"
                    );
                    return Arc::clone(&entry.table);
                }
            }
        }

        let query = TicketQuery::lookback(now.date_naive(), self.settings.lookback_days);
        let started = Instant::now();

        let raw = match self.source.search(&query) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(error = %e, force_refresh, "Ticket fetch failed");
                return Arc::new(TicketTable::default());
            }
        };

        if raw.is_empty() {
            tracing::info!(jql = %query.to_jql(), "Ticket source returned no tickets");
            return Arc::new(TicketTable::default());
        }

        let table = Arc::new(enrich(&raw));
        tracing::info!(
            records = table.len(),
            force_refresh,
            duration_ms = started.elapsed().as_millis() as u64,
            "Ticket cache refreshed"
        );

        self.cache = Some(CacheEntry {
            table: Arc::clone(&table),
            fetched_at: now,
        });
        table
    }

    /// All reports over the current table.
    ///
    /// Returns [`Error::NoData`](crate::Error::NoData) when there are no tickets.
    pub fn generate_comprehensive_report(&mut self, force_refresh: bool) -> Result<ComprehensiveReport> {
        let table = self.get_fresh_data(force_refresh);
        ComprehensiveReport::from_table(&table, self.cache_timestamp())
    }
}
