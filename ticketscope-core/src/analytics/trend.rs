//! Time-series rollups and trend direction.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::types::{TicketTable, YearMonth};

/// Normalized slope of a least-squares line through `series`.
///
/// The series is fitted against positions `0..n`. The slope is divided by
/// `max(|slope|, 1)`, so the result keeps its sign and lies in `[-1, 1]`.
/// Fewer than two points have no trend and yield `0.0`.
pub fn trend_direction(series: &[f64]) -> f64 {
    let n = series.len();
    if n < 2 {
        return 0.0;
    }

    let n_f = n as f64;
    let mean_x = (n_f - 1.0) / 2.0;
    let mean_y = series.iter().sum::<f64>() / n_f;

    let (mut covariance, mut variance) = (0.0, 0.0);
    for (i, &y) in series.iter().enumerate() {
        let dx = i as f64 - mean_x;
        covariance += dx * (y - mean_y);
        variance += dx * dx;
    }

    let slope = covariance / variance;
    if !slope.is_finite() {
        return 0.0;
    }
    slope / slope.abs().max(1.0)
}

/// One bucket of a count series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendPoint<K> {
    pub key: K,
    pub count: i64,
}

/// Counts per bucket in ascending key order, plus their trend direction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendSeries<K> {
    pub points: Vec<TrendPoint<K>>,
    /// See [`trend_direction`]
    pub direction: f64,
}

impl<K> Default for TrendSeries<K> {
    fn default() -> Self {
        Self {
            points: Vec::new(),
            direction: 0.0,
        }
    }
}

impl<K: Ord> TrendSeries<K> {
    /// Count occurrences of each key and compute the direction.
    pub fn from_keys(keys: impl IntoIterator<Item = K>) -> Self {
        let mut counts: BTreeMap<K, i64> = BTreeMap::new();
        for key in keys {
            *counts.entry(key).or_insert(0) += 1;
        }

        let points: Vec<TrendPoint<K>> = counts
            .into_iter()
            .map(|(key, count)| TrendPoint { key, count })
            .collect();
        let values: Vec<f64> = points.iter().map(|p| p.count as f64).collect();

        Self {
            direction: trend_direction(&values),
            points,
        }
    }
}

impl<K> TrendSeries<K> {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Sum of all bucket counts.
    pub fn total(&self) -> i64 {
        self.points.iter().map(|p| p.count).sum()
    }
}

/// Creation and resolution activity over time.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TrendAnalytics {
    /// Tickets created per day
    pub daily_creation: TrendSeries<NaiveDate>,
    /// Tickets created per week, keyed by the week's Monday
    pub weekly_creation: TrendSeries<NaiveDate>,
    /// Tickets created per calendar month
    pub monthly_creation: TrendSeries<YearMonth>,
    /// Resolved tickets per day of last update
    pub daily_resolution: TrendSeries<NaiveDate>,
}

impl TrendAnalytics {
    /// Direction of daily ticket creation.
    pub fn creation_trend(&self) -> f64 {
        self.daily_creation.direction
    }

    /// Direction of daily ticket resolution.
    pub fn resolution_trend(&self) -> f64 {
        self.daily_resolution.direction
    }
}

/// Roll the table up into daily, weekly and monthly series.
///
/// Tickets without the relevant timestamp are left out of that series.
pub fn trend_analytics(table: &TicketTable) -> TrendAnalytics {
    if table.is_empty() {
        return TrendAnalytics::default();
    }

    TrendAnalytics {
        daily_creation: TrendSeries::from_keys(table.iter().filter_map(|t| t.created_date)),
        weekly_creation: TrendSeries::from_keys(table.iter().filter_map(|t| t.week_start)),
        monthly_creation: TrendSeries::from_keys(table.iter().filter_map(|t| t.created_month)),
        daily_resolution: TrendSeries::from_keys(
            table
                .iter()
                .filter(|t| t.is_resolved)
                .filter_map(|t| t.updated_date()),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::enrich::enrich;
    use crate::types::RawTicket;

    fn ticket(key: &str, status: &str, created: &str, updated: &str) -> RawTicket {
        RawTicket {
            key: key.to_string(),
            summary: String::new(),
            status: status.to_string(),
            assignee: "Amy".to_string(),
            project: "OPS".to_string(),
            priority: "Medium".to_string(),
            created: Some(created.to_string()),
            updated: Some(updated.to_string()),
            issue_type: None,
            reporter: None,
        }
    }

    #[test]
    fn test_short_series_has_no_trend() {
        assert_eq!(trend_direction(&[]), 0.0);
        assert_eq!(trend_direction(&[42.0]), 0.0);
    }

    #[test]
    fn test_flat_series() {
        assert_eq!(trend_direction(&[3.0, 3.0, 3.0, 3.0]), 0.0);
    }

    #[test]
    fn test_steep_slopes_are_capped() {
        assert_eq!(trend_direction(&[1.0, 10.0, 20.0]), 1.0);
        assert_eq!(trend_direction(&[20.0, 10.0, 1.0]), -1.0);
    }

    #[test]
    fn test_gentle_slope_is_kept() {
        // slope of 0.5 per step
        let direction = trend_direction(&[1.0, 1.5, 2.0, 2.5]);
        assert!((direction - 0.5).abs() < 1e-9);

        let direction = trend_direction(&[2.5, 2.0, 1.5, 1.0]);
        assert!((direction + 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_direction_stays_in_range() {
        let series = [5.0, 0.0, 100.0, 3.0, 7.0, 1e6, -4.0, 0.5];
        for len in 0..=series.len() {
            let d = trend_direction(&series[..len]);
            assert!((-1.0..=1.0).contains(&d), "len {} gave {}", len, d);
        }
    }

    #[test]
    fn test_empty_table() {
        let trends = trend_analytics(&TicketTable::default());
        assert!(trends.daily_creation.is_empty());
        assert_eq!(trends.creation_trend(), 0.0);
        assert_eq!(trends.resolution_trend(), 0.0);
    }

    #[test]
    fn test_series_buckets() {
        let table = enrich(&[
            ticket("A-1", "Done", "2024-01-01", "2024-01-03"),
            ticket("A-2", "Open", "2024-01-01", "2024-01-01"),
            // Sunday, same ISO week as Jan 1
            ticket("A-3", "Closed", "2024-01-07", "2024-01-09"),
            ticket("A-4", "Open", "2024-02-12", "2024-02-12"),
        ]);

        let trends = trend_analytics(&table);

        let daily: Vec<(String, i64)> = trends
            .daily_creation
            .points
            .iter()
            .map(|p| (p.key.to_string(), p.count))
            .collect();
        assert_eq!(
            daily,
            vec![
                ("2024-01-01".to_string(), 2),
                ("2024-01-07".to_string(), 1),
                ("2024-02-12".to_string(), 1),
            ]
        );

        let weekly: Vec<(String, i64)> = trends
            .weekly_creation
            .points
            .iter()
            .map(|p| (p.key.to_string(), p.count))
            .collect();
        assert_eq!(
            weekly,
            vec![("2024-01-01".to_string(), 3), ("2024-02-12".to_string(), 1)]
        );

        assert_eq!(trends.monthly_creation.points.len(), 2);
        assert_eq!(trends.monthly_creation.points[0].key, YearMonth::new(2024, 1));
        assert_eq!(trends.monthly_creation.points[0].count, 3);

        assert_eq!(trends.daily_resolution.total(), 2);
        assert_eq!(trends.daily_resolution.points[0].key.to_string(), "2024-01-03");
        assert_eq!(trends.daily_resolution.points[1].key.to_string(), "2024-01-09");

        // 2, 1, 1 is falling
        assert!(trends.creation_trend() < 0.0);
    }
}
