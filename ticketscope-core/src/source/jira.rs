//! Jira Cloud search client.
//!
//! Read-only: runs a JQL search against `/rest/api/3/search` and maps each
//! issue to a [`RawTicket`]. Paging stops at the reported total, on a short
//! page, or at `max_issues`.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;

use super::{TicketQuery, TicketSource};
use crate::config::JiraConfig;
use crate::error::{Error, Result};
use crate::types::{RawTicket, NO_PRIORITY, UNASSIGNED};

/// Issue fields requested from the search API.
pub const FIELDS: &str = "summary,status,assignee,project,issuetype,created,updated,priority,reporter";

/// Ticket source backed by the Jira Cloud REST API.
pub struct JiraSource {
    http_client: Client,
    base_url: String,
    email: String,
    api_token: String,
    page_size: u32,
    max_issues: u32,
}

impl JiraSource {
    /// Create a source from configuration.
    ///
    /// Returns an error if credentials are missing or the HTTP client cannot be built.
    pub fn new(config: &JiraConfig) -> Result<Self> {
        config.validate()?;

        let base_url = config
            .base_url
            .as_deref()
            .ok_or_else(|| Error::Config("jira.base_url is required".to_string()))?
            .trim_end_matches('/')
            .to_string();
        let email = config
            .email
            .clone()
            .ok_or_else(|| Error::Config("jira.email is required".to_string()))?;
        let api_token = config
            .api_token
            .clone()
            .ok_or_else(|| Error::Config("jira.api_token is required".to_string()))?;

        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Config(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url,
            email,
            api_token,
            page_size: config.page_size,
            max_issues: config.max_issues,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn fetch_page(&self, jql: &str, start_at: u32) -> Result<SearchPage> {
        let url = format!("{}/rest/api/3/search", self.base_url);
        let response = self
            .http_client
            .get(&url)
            .basic_auth(&self.email, Some(&self.api_token))
            .query(&[
                ("jql", jql.to_string()),
                ("startAt", start_at.to_string()),
                ("maxResults", self.page_size.to_string()),
                ("fields", FIELDS.to_string()),
            ])
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_else(|_| "unknown".to_string());
            return Err(Error::Source(format!("Jira search failed ({}): {}", status, body)));
        }

        Ok(response.json()?)
    }
}

impl TicketSource for JiraSource {
    fn search(&self, query: &TicketQuery) -> Result<Vec<RawTicket>> {
        let jql = query.to_jql();
        let mut tickets = Vec::new();
        let mut start_at = 0u32;

        loop {
            let page = self.fetch_page(&jql, start_at)?;
            let received = page.issues.len() as u32;
            tracing::debug!(start_at, received, total = ?page.total, "Fetched Jira page");

            tickets.extend(page.issues.into_iter().map(RawTicket::from));

            match next_start(start_at, received, page.total, self.page_size) {
                Some(next) if tickets.len() < self.max_issues as usize => start_at = next,
                _ => break,
            }
        }

        tickets.truncate(self.max_issues as usize);
        tracing::info!(count = tickets.len(), jql = %jql, "Jira search complete");
        Ok(tickets)
    }
}

/// Offset of the next page, or `None` when the search is exhausted.
///
/// Jira may cap a page below the requested size, so a short page only ends
/// the search when the response carries no `total`.
fn next_start(start_at: u32, received: u32, total: Option<u32>, page_size: u32) -> Option<u32> {
    if received == 0 {
        return None;
    }
    let next = start_at.saturating_add(received);
    match total {
        Some(total) if next >= total => None,
        Some(_) => Some(next),
        None if received < page_size => None,
        None => Some(next),
    }
}

// ============================================
// Wire models
// ============================================

/// One page of `/rest/api/3/search`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchPage {
    #[serde(default)]
    total: Option<u32>,
    #[serde(default)]
    issues: Vec<Issue>,
}

#[derive(Debug, Deserialize)]
struct Issue {
    key: String,
    fields: IssueFields,
}

#[derive(Debug, Deserialize)]
struct IssueFields {
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    status: Option<Named>,
    #[serde(default)]
    assignee: Option<Person>,
    #[serde(default)]
    project: Option<ProjectRef>,
    #[serde(default)]
    issuetype: Option<Named>,
    #[serde(default)]
    created: Option<String>,
    #[serde(default)]
    updated: Option<String>,
    #[serde(default)]
    priority: Option<Named>,
    #[serde(default)]
    reporter: Option<Person>,
}

#[derive(Debug, Deserialize)]
struct Named {
    name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Person {
    display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProjectRef {
    key: String,
}

impl From<Issue> for RawTicket {
    fn from(issue: Issue) -> Self {
        let fields = issue.fields;
        RawTicket {
            summary: fields.summary.unwrap_or_default(),
            status: fields.status.map(|s| s.name).unwrap_or_default(),
            assignee: fields
                .assignee
                .and_then(|p| p.display_name)
                .unwrap_or_else(|| UNASSIGNED.to_string()),
            project: fields
                .project
                .map(|p| p.key)
                .or_else(|| issue.key.split('-').next().map(str::to_string))
                .unwrap_or_default(),
            priority: fields
                .priority
                .map(|p| p.name)
                .unwrap_or_else(|| NO_PRIORITY.to_string()),
            created: fields.created,
            updated: fields.updated,
            issue_type: fields.issuetype.map(|t| t.name),
            reporter: Some(
                fields
                    .reporter
                    .and_then(|p| p.display_name)
                    .unwrap_or_else(|| "Unknown".to_string()),
            ),
            key: issue.key,
        }
    }
}
