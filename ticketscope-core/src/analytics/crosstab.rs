//! Frequency tables and two-way contingency tables.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

/// How often one label occurs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueCount {
    pub value: String,
    pub count: i64,
}

/// Count labels, most frequent first (ties alphabetical).
pub fn value_counts<'a>(values: impl IntoIterator<Item = &'a str>) -> Vec<ValueCount> {
    let mut counts: BTreeMap<&str, i64> = BTreeMap::new();
    for value in values {
        *counts.entry(value).or_insert(0) += 1;
    }

    let mut rows: Vec<ValueCount> = counts
        .into_iter()
        .map(|(value, count)| ValueCount {
            value: value.to_string(),
            count,
        })
        .collect();
    rows.sort_by(|a, b| b.count.cmp(&a.count));
    rows
}

/// Counts for every (row, column) label pair, zero-filled.
///
/// Row and column labels are sorted ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CrossTab {
    pub rows: Vec<String>,
    pub columns: Vec<String>,
    /// `counts[r][c]` for `rows[r]` x `columns[c]`
    pub counts: Vec<Vec<i64>>,
}

impl CrossTab {
    pub fn from_pairs<R, C>(pairs: impl IntoIterator<Item = (R, C)>) -> Self
    where
        R: Into<String>,
        C: Into<String>,
    {
        let mut cells: BTreeMap<(String, String), i64> = BTreeMap::new();
        let mut rows = BTreeSet::new();
        let mut columns = BTreeSet::new();

        for (row, column) in pairs {
            let (row, column) = (row.into(), column.into());
            rows.insert(row.clone());
            columns.insert(column.clone());
            *cells.entry((row, column)).or_insert(0) += 1;
        }

        let rows: Vec<String> = rows.into_iter().collect();
        let columns: Vec<String> = columns.into_iter().collect();
        let counts = rows
            .iter()
            .map(|r| {
                columns
                    .iter()
                    .map(|c| cells.get(&(r.clone(), c.clone())).copied().unwrap_or(0))
                    .collect()
            })
            .collect();

        Self {
            rows,
            columns,
            counts,
        }
    }

    /// Count for a cell; 0 for unknown labels.
    pub fn get(&self, row: &str, column: &str) -> i64 {
        let r = self.rows.iter().position(|x| x == row);
        let c = self.columns.iter().position(|x| x == column);
        match (r, c) {
            (Some(r), Some(c)) => self.counts[r][c],
            _ => 0,
        }
    }

    /// Sum of one row.
    pub fn row_total(&self, row: &str) -> i64 {
        self.rows
            .iter()
            .position(|x| x == row)
            .map(|r| self.counts[r].iter().sum())
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
