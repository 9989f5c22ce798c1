//! ticketscope - ticket analytics from the command line
//!
//! Fetches recent tickets from Jira (or a JSON file) and prints reports.

mod render;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use ticketscope_core::analytics::{
    assignee_detail, assignee_performance, top_assignees_by, AssigneeMetric, TicketAnalytics,
};
use ticketscope_core::source::{JiraSource, JsonFileSource};
use ticketscope_core::{Config, Error, TicketSource, TicketTable};

const NO_DATA: &str = "No data available";

#[derive(Parser, Debug)]
#[command(name = "ticketscope")]
#[command(about = "Read-only analytics over issue-tracker tickets")]
#[command(version)]
struct Args {
    /// Read tickets from a JSON file instead of Jira
    #[arg(long, global = true)]
    input: Option<PathBuf>,

    /// Ignore any cached data and fetch again
    #[arg(long, global = true)]
    refresh: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Every report in one document
    Report {
        /// Export format (md = markdown, json = JSON)
        #[arg(long)]
        export: Option<String>,
    },
    /// Per-assignee performance summary
    Assignees {
        /// Only assignees with at least this many tickets
        #[arg(long, default_value_t = 1)]
        min_tickets: i64,

        /// Maximum rows to show
        #[arg(long, default_value_t = 25)]
        limit: usize,
    },
    /// Stats for the first assignee whose name contains QUERY
    Assignee {
        query: String,
    },
    /// Top assignees ranked by a metric
    Top {
        /// total_tickets, resolved_tickets, resolution_rate or avg_resolution_time
        #[arg(long, default_value = "total_tickets")]
        metric: String,

        /// Maximum rows to show
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// Show effective settings
    Config,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = Config::load().context("failed to load configuration")?;
    let _log_guard = ticketscope_core::logging::init(&config.logging).ok();

    let use_jira = args.input.is_none() && !matches!(args.command, Command::Config);
    config.validate(use_jira).with_context(|| {
        format!(
            "invalid configuration; set JIRA_URL, JIRA_EMAIL and JIRA_API_TOKEN, edit {}, or pass --input",
            Config::config_path().display()
        )
    })?;

    match &args.command {
        Command::Config => render::print_config(&config, args.input.as_deref()),
        Command::Report { export } => {
            let format = ExportFormat::parse(export.as_deref())?;
            let mut analytics = open_analytics(&config, &args)?;

            let spinner = spinner("Fetching tickets...");
            let result = analytics.generate_comprehensive_report(args.refresh);
            spinner.finish_and_clear();

            match result {
                Ok(report) => match format {
                    ExportFormat::Terminal => render::print_terminal(&report),
                    ExportFormat::Markdown => render::print_markdown(&report),
                    ExportFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&report)?)
                    }
                },
                Err(Error::NoData) => println!("{}", NO_DATA),
                Err(e) => return Err(e).context("failed to generate report"),
            }
        }
        Command::Assignees { min_tickets, limit } => {
            let mut analytics = open_analytics(&config, &args)?;
            let Some(table) = fetch(&mut analytics, args.refresh) else {
                println!("{}", NO_DATA);
                return Ok(());
            };
            let rows = assignee_performance(&table, *min_tickets, *limit);
            render::print_assignee_table(
                &format!("ASSIGNEES (min {} tickets)", min_tickets),
                &rows,
            );
        }
        Command::Assignee { query } => {
            let mut analytics = open_analytics(&config, &args)?;
            let Some(table) = fetch(&mut analytics, args.refresh) else {
                println!("{}", NO_DATA);
                return Ok(());
            };
            match assignee_detail(&table, query)? {
                Some(stats) => render::print_assignee_detail(&stats),
                None => println!("No assignee matching '{}'", query.trim()),
            }
        }
        Command::Top { metric, limit } => {
            // Reject a bad metric before touching the source
            let metric: AssigneeMetric = metric.parse()?;
            let mut analytics = open_analytics(&config, &args)?;
            let Some(table) = fetch(&mut analytics, args.refresh) else {
                println!("{}", NO_DATA);
                return Ok(());
            };
            let rows = top_assignees_by(&table, metric, *limit);
            render::print_assignee_table(&format!("TOP ASSIGNEES BY {}", metric), &rows);
        }
    }

    Ok(())
}

/// Analytics over a file when `--input` is given, over Jira otherwise.
fn open_analytics(config: &Config, args: &Args) -> Result<TicketAnalytics<Box<dyn TicketSource>>> {
    let source = open_source(config, args.input.clone())?;
    Ok(TicketAnalytics::new(source, &config.analytics))
}

fn open_source(config: &Config, input: Option<PathBuf>) -> Result<Box<dyn TicketSource>> {
    match input {
        Some(path) => {
            tracing::info!(path = %path.display(), "Reading tickets from file");
            Ok(Box::new(JsonFileSource::new(path)))
        }
        None => {
            let source = JiraSource::new(&config.jira).context("failed to create Jira client")?;
            tracing::info!(base_url = source.base_url(), "Reading tickets from Jira");
            Ok(Box::new(source))
        }
    }
}

/// Current table, or `None` when there is nothing to report on.
fn fetch<S: TicketSource>(
    analytics: &mut TicketAnalytics<S>,
    force_refresh: bool,
) -> Option<std::sync::Arc<TicketTable>> {
    let spinner = spinner("Fetching tickets...");
    let table = analytics.get_fresh_data(force_refresh);
    spinner.finish_and_clear();
    (!table.is_empty()).then_some(table)
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExportFormat {
    Terminal,
    Markdown,
    Json,
}

impl ExportFormat {
    fn parse(value: Option<&str>) -> Result<Self> {
        match value {
            None => Ok(ExportFormat::Terminal),
            Some("md") => Ok(ExportFormat::Markdown),
            Some("json") => Ok(ExportFormat::Json),
            Some(other) => anyhow::bail!("Unknown export format: {}. Use 'md' or 'json'", other),
        }
    }
}
