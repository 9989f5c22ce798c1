//! Terminal and markdown output.

use std::path::Path;

use ticketscope_core::analytics::{AssigneeStats, ComprehensiveReport, CrossTab, ValueCount};
use ticketscope_core::format::{format_days, format_freshness, format_pct, trend_label};
use ticketscope_core::Config;

const WIDTH: usize = 60;

fn header(title: &str) {
    println!();
    println!("╭{}╮", "─".repeat(WIDTH));
    println!("│{:^width$}│", title, width = WIDTH);
    println!("╰{}╯", "─".repeat(WIDTH));
    println!();
}

pub fn print_terminal(report: &ComprehensiveReport) {
    header("TICKET ANALYTICS");
    println!(
        "   {} tickets, {}",
        report.total_records,
        format_freshness(report.data_freshness)
    );
    println!();

    let o = &report.overview;
    println!("OVERVIEW");
    println!(
        "   Total:    {:<10} Resolved: {:<10} Rate: {}",
        o.total_tickets,
        o.resolved_tickets,
        format_pct(o.resolution_rate)
    );
    println!(
        "   Active:   {:<10} Pending:  {:<10} Other: {}",
        o.active_tickets, o.pending_tickets, o.other_tickets
    );
    println!("   Avg resolution: {:.1} days", o.avg_resolution_time);
    println!();

    print_assignee_rows("TOP ASSIGNEES", &report.assignees.top_assignees);
    if !report.assignees.most_efficient.is_empty() {
        print_assignee_rows("MOST EFFICIENT", &report.assignees.most_efficient);
    }

    if !report.projects.most_active_projects.is_empty() {
        println!("PROJECTS ({})", report.projects.project_count);
        for p in &report.projects.most_active_projects {
            println!(
                "   {:<12} {:>5} tickets  {:>6} done  avg {}",
                p.project,
                p.total_tickets,
                format_pct(p.completion_rate),
                format_days(p.avg_resolution_time)
            );
        }
        println!();
    }

    let t = &report.trends;
    println!("TRENDS");
    println!(
        "   Created:  {} over {} days ({})",
        t.daily_creation.total(),
        t.daily_creation.points.len(),
        trend_label(t.creation_trend())
    );
    println!(
        "   Resolved: {} over {} days ({})",
        t.daily_resolution.total(),
        t.daily_resolution.points.len(),
        trend_label(t.resolution_trend())
    );
    for point in &t.monthly_creation.points {
        println!("   {}  {:>5}", point.key, point.count);
    }
    println!();

    print_counts("STATUS", &report.status.status_category_distribution);
    print_counts("PRIORITY", &report.priority.priority_distribution);

    if !report.priority.priority_resolution_times.is_empty() {
        println!("RESOLUTION BY PRIORITY");
        for p in &report.priority.priority_resolution_times {
            println!(
                "   {:<10} mean {:<8} median {:<8} ({} resolved)",
                p.priority,
                format_days(p.mean),
                format_days(p.median),
                p.count
            );
        }
        println!();
    }
}

fn print_assignee_rows(title: &str, rows: &[AssigneeStats]) {
    println!("{}", title);
    for (i, s) in rows.iter().enumerate() {
        println!(
            "   {:>2}. {:<20} {:>5} tickets  {:>6} resolved  avg {}",
            i + 1,
            s.assignee,
            s.total_tickets,
            format_pct(s.resolution_rate),
            format_days(s.avg_resolution_time)
        );
    }
    println!();
}

fn print_counts(title: &str, counts: &[ValueCount]) {
    if counts.is_empty() {
        return;
    }
    println!("{}", title);
    for c in counts {
        println!("   {:<16} {:>5}", c.value, c.count);
    }
    println!();
}

/// Table of assignees as printed by `assignees` and `top`.
pub fn print_assignee_table(title: &str, rows: &[AssigneeStats]) {
    if rows.is_empty() {
        println!("No assignees match");
        return;
    }
    print_assignee_rows(title, rows);
}

pub fn print_assignee_detail(stats: &AssigneeStats) {
    println!("Assignee:        {}", stats.assignee);
    println!("Total tickets:   {}", stats.total_tickets);
    println!("Resolved:        {}", stats.resolved_tickets);
    println!("Resolution rate: {}", format_pct(stats.resolution_rate));
    println!("Avg resolution:  {}", format_days(stats.avg_resolution_time));
    println!("Avg priority:    {:.2}", stats.avg_priority);
}

pub fn print_markdown(report: &ComprehensiveReport) {
    println!("# Ticket Analytics");
    println!();
    println!(
        "*{} tickets, {}*",
        report.total_records,
        format_freshness(report.data_freshness)
    );
    println!();

    let o = &report.overview;
    println!("## Overview");
    println!();
    println!("| Metric | Value |");
    println!("|--------|-------|");
    println!("| Total | {} |", o.total_tickets);
    println!("| Active | {} |", o.active_tickets);
    println!("| Resolved | {} |", o.resolved_tickets);
    println!("| Pending | {} |", o.pending_tickets);
    println!("| Other | {} |", o.other_tickets);
    println!("| Resolution rate | {} |", format_pct(o.resolution_rate));
    println!("| Avg resolution (days) | {:.1} |", o.avg_resolution_time);
    println!();

    println!("## Assignees");
    println!();
    println!("| Assignee | Tickets | Resolved | Rate | Avg days |");
    println!("|----------|---------|----------|------|----------|");
    for s in &report.assignees.top_assignees {
        println!(
            "| {} | {} | {} | {} | {} |",
            s.assignee,
            s.total_tickets,
            s.resolved_tickets,
            format_pct(s.resolution_rate),
            format_days(s.avg_resolution_time)
        );
    }
    println!();

    println!("## Projects");
    println!();
    println!("| Project | Tickets | Resolved | Completion | Avg days |");
    println!("|---------|---------|----------|------------|----------|");
    for p in &report.projects.project_stats {
        println!(
            "| {} | {} | {} | {} | {} |",
            p.project,
            p.total_tickets,
            p.resolved_tickets,
            format_pct(p.completion_rate),
            format_days(p.avg_resolution_time)
        );
    }
    println!();

    println!("## Monthly Creation");
    println!();
    for point in &report.trends.monthly_creation.points {
        println!("- **{}**: {}", point.key, point.count);
    }
    println!();

    println!("## Status by Project");
    println!();
    print_crosstab_markdown(&report.status.status_flow);

    println!("## Priority by Project");
    println!();
    print_crosstab_markdown(&report.priority.priority_by_project);
}

fn print_crosstab_markdown(table: &CrossTab) {
    if table.is_empty() {
        println!("*None*");
        println!();
        return;
    }
    println!("| | {} | Total |", table.columns.join(" | "));
    println!("|---|{}---|", "---|".repeat(table.columns.len()));
    for (row, counts) in table.rows.iter().zip(&table.counts) {
        let cells: Vec<String> = counts.iter().map(|c| c.to_string()).collect();
        println!(
            "| {} | {} | {} |",
            row,
            cells.join(" | "),
            table.row_total(row)
        );
    }
    println!();
}

pub fn print_config(config: &Config, input: Option<&Path>) {
    println!("Config file:    {}", Config::config_path().display());
    println!("Log file:       {}", Config::log_path().display());
    println!(
        "Cache duration: {}s",
        config.analytics.cache_duration().as_secs()
    );
    println!("Lookback:       {} days", config.analytics.lookback_days);
    match input {
        Some(path) => println!("Source:         file {}", path.display()),
        None if config.jira.is_ready() => println!(
            "Source:         jira {}",
            config.jira.base_url.as_deref().unwrap_or_default()
        ),
        None => println!("Source:         jira (not configured)"),
    }
}
