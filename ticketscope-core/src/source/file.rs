//! Tickets from a JSON file.

use std::path::{Path, PathBuf};

use super::{SortOrder, TicketQuery, TicketSource};
use crate::analytics::enrich::parse_timestamp;
use crate::error::{Error, Result};
use crate::types::RawTicket;

/// Reads a JSON array of [`RawTicket`]s on every search.
///
/// The query window and ordering are applied to tickets whose `created`
/// parses. Tickets with a missing or unparseable `created` are kept and
/// placed last, so enrichment still sees them.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TicketSource for JsonFileSource {
    fn search(&self, query: &TicketQuery) -> Result<Vec<RawTicket>> {
        let content = std::fs::read_to_string(&self.path)?;
        let tickets: Vec<RawTicket> = serde_json::from_str(&content).map_err(|e| {
            Error::Source(format!("malformed ticket file {:?}: {}", self.path, e))
        })?;

        let mut dated = Vec::new();
        let mut undated = Vec::new();
        for ticket in tickets {
            match ticket.created.as_deref().and_then(parse_timestamp) {
                Some(created) if created.date_naive() >= query.created_on_or_after => {
                    dated.push((created, ticket))
                }
                Some(_) => {}
                None => undated.push(ticket),
            }
        }

        match query.order {
            SortOrder::NewestFirst => dated.sort_by(|a, b| b.0.cmp(&a.0)),
            SortOrder::OldestFirst => dated.sort_by(|a, b| a.0.cmp(&b.0)),
        }

        let mut result: Vec<RawTicket> = dated.into_iter().map(|(_, t)| t).collect();
        result.extend(undated);
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_fixture(json: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    fn query(order: SortOrder) -> TicketQuery {
        TicketQuery {
            created_on_or_after: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            order,
        }
    }

    const TICKETS: &str = r#"[
        {"key": "A-1", "status": "Open", "project": "A", "created": "2024-01-01"},
        {"key": "A-2", "status": "Open", "project": "A", "created": "2024-01-03"},
        {"key": "A-3", "status": "Done", "project": "A", "created": "2024-01-05"},
        {"key": "A-4", "status": "Done", "project": "A", "created": "yesterday"}
    ]"#;

    #[test]
    fn test_window_and_newest_first() {
        let file = write_fixture(TICKETS);
        let source = JsonFileSource::new(file.path());

        let keys: Vec<String> = source
            .search(&query(SortOrder::NewestFirst))
            .unwrap()
            .into_iter()
            .map(|t| t.key)
            .collect();
        assert_eq!(keys, vec!["A-3", "A-2", "A-4"]);
    }

    #[test]
    fn test_oldest_first() {
        let file = write_fixture(TICKETS);
        let source = JsonFileSource::new(file.path());

        let keys: Vec<String> = source
            .search(&query(SortOrder::OldestFirst))
            .unwrap()
            .into_iter()
            .map(|t| t.key)
            .collect();
        assert_eq!(keys, vec!["A-2", "A-3", "A-4"]);
    }

    #[test]
    fn test_empty_array_is_not_an_error() {
        let file = write_fixture("[]");
        let source = JsonFileSource::new(file.path());
        assert!(source.search(&query(SortOrder::NewestFirst)).unwrap().is_empty());
    }

    #[test]
    fn test_failures_are_errors() {
        let file = write_fixture("{not json");
        let source = JsonFileSource::new(file.path());
        assert!(matches!(
            source.search(&query(SortOrder::NewestFirst)),
            Err(Error::Source(_))
        ));

        let missing = JsonFileSource::new("/nonexistent/tickets.json");
        assert!(matches!(
            missing.search(&query(SortOrder::NewestFirst)),
            Err(Error::Io(_))
        ));
    }
}
