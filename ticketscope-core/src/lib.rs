//! # ticketscope-core
//!
//! Core library for ticketscope, a read-only analytics engine for
//! issue-tracker tickets.
//!
//! This library provides:
//! - Domain types for raw and enriched tickets
//! - Ticket sources (Jira Cloud, JSON file)
//! - A cached analytics engine and its reports
//! - Configuration management
//! - Logging infrastructure
//!
//! ## Architecture
//!
//! Data flows through three stages:
//! - **Raw:** Tickets as the source returns them ([`RawTicket`])
//! - **Enriched:** One table with per-ticket derived metrics ([`TicketTable`])
//! - **Reports:** Aggregates computed on demand from the table
//!
//! ## Example
//!
//! ```rust,no_run
//! use ticketscope_core::{Config, TicketAnalytics};
//! use ticketscope_core::source::JiraSource;
//!
//! let config = Config::load().expect("failed to load config");
//! let source = JiraSource::new(&config.jira).expect("jira is not configured");
//! let mut analytics = TicketAnalytics::new(source, &config.analytics);
//!
//! let report = analytics.generate_comprehensive_report(false).expect("no tickets");
//! println!("{:.1}% resolved", report.overview.resolution_rate);
//! ```

// Re-export commonly used items at the crate root
pub use analytics::{ComprehensiveReport, TicketAnalytics};
pub use config::Config;
pub use error::{Error, Result};
pub use source::TicketSource;
pub use types::*;

// Public modules
pub mod analytics;
pub mod config;
pub mod error;
pub mod format;
pub mod logging;
pub mod source;
pub mod types;
