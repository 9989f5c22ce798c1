//! Formatting helpers for report output.

use chrono::{DateTime, Utc};

/// Format a timestamp relative to `now` (e.g., "2m ago").
pub fn format_relative_time_at(ts: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let duration = now.signed_duration_since(ts);

    if duration.num_seconds() < 5 {
        "just now".to_string()
    } else if duration.num_seconds() < 60 {
        format!("{}s ago", duration.num_seconds())
    } else if duration.num_minutes() < 60 {
        format!("{}m ago", duration.num_minutes())
    } else if duration.num_hours() < 24 {
        format!("{}h ago", duration.num_hours())
    } else {
        ts.format("%Y-%m-%d %H:%M UTC").to_string()
    }
}

/// Describe how fresh the report data is.
pub fn format_freshness(ts: Option<DateTime<Utc>>) -> String {
    match ts {
        Some(ts) => format!("fetched {}", format_relative_time_at(ts, Utc::now())),
        None => "not cached".to_string(),
    }
}

/// Format a day count, or "n/a" when there is nothing to average.
pub fn format_days(days: Option<f64>) -> String {
    match days {
        Some(d) => format!("{:.1}d", d),
        None => "n/a".to_string(),
    }
}

/// Format a percentage with one decimal.
pub fn format_pct(pct: f64) -> String {
    format!("{:.1}%", pct)
}

/// Label a trend direction in `[-1, 1]`.
pub fn trend_label(direction: f64) -> &'static str {
    if direction > 0.1 {
        "rising"
    } else if direction < -0.1 {
        "falling"
    } else {
        "flat"
    }
}
