//! Per-ticket enrichment.
//!
//! Turns [`RawTicket`]s into [`EnrichedTicket`]s. Every derivation is
//! row-local: one bad timestamp only blanks the fields that depend on it.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, Utc};

use crate::types::{
    priority_score, EnrichedTicket, RawTicket, StatusCategory, TicketTable, YearMonth,
};

/// Enrich a batch of raw tickets, preserving input order.
pub fn enrich(raw: &[RawTicket]) -> TicketTable {
    TicketTable::new(raw.iter().map(enrich_ticket).collect())
}

/// Derive all metrics for a single ticket.
pub fn enrich_ticket(raw: &RawTicket) -> EnrichedTicket {
    let created_at = parse_field(&raw.key, "created", raw.created.as_deref());
    let updated_at = parse_field(&raw.key, "updated", raw.updated.as_deref());

    let status_category = StatusCategory::from_status(&raw.status);
    let is_resolved = status_category == StatusCategory::Resolved;

    let resolution_time_days = match (is_resolved, created_at, updated_at) {
        (true, Some(created), Some(updated)) => {
            Some((updated.date_naive() - created.date_naive()).num_days())
        }
        _ => None,
    };

    let created_date = created_at.map(|ts| ts.date_naive());

    EnrichedTicket {
        raw: raw.clone(),
        is_resolved,
        resolution_time_days,
        status_category,
        priority_score: priority_score(&raw.priority),
        created_at,
        updated_at,
        created_date,
        created_week: created_date.map(|d| d.iso_week().week()),
        created_month: created_date.map(|d| YearMonth::new(d.year(), d.month())),
        created_year: created_date.map(|d| d.year()),
        week_start: created_date.map(week_start),
    }
}

/// Monday of the ISO week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

fn parse_field(key: &str, field: &str, value: Option<&str>) -> Option<DateTime<Utc>> {
    let value = value?;
    let parsed = parse_timestamp(value);
    if parsed.is_none() {
        tracing::debug!(ticket = key, field, value, "Unparseable timestamp");
    }
    parsed
}

/// Parse a tracker timestamp into UTC.
///
/// Accepts RFC 3339, Jira's `2024-01-05T10:00:00.000+0000`, naive date-times
/// (taken as UTC) and bare dates (UTC midnight).
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts.with_timezone(&Utc));
    }
    if let Ok(ts) = DateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f%z") {
        return Some(ts.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
