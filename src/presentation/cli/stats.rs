use anyhow::Result;
use clap::Args;

use super::print_json;
use crate::domain::formatting::{EM_DASH, format_pages, format_percentage_change};
use crate::domain::stats::StatsReport;
use crate::infrastructure::client::LiburutegiaClient;

#[derive(Debug, Args)]
pub struct StatsCommand {
    /// Print a short human-readable summary instead of JSON
    #[arg(long)]
    pub summary: bool,
}

pub async fn run(client: &LiburutegiaClient, command: StatsCommand) -> Result<()> {
    let snapshot = client.stats().get().await?;
    if command.summary {
        for line in summary_lines(&snapshot.report) {
            println!("{line}");
        }
        Ok(())
    } else {
        print_json(&snapshot)
    }
}

pub fn summary_lines(report: &StatsReport) -> Vec<String> {
    let facts = &report.fun_facts;
    let mut lines = vec![
        format!(
            "Books: {} ({} finished, {} reading, {} to read)",
            report.total_books, report.finished_count, report.reading_count, report.to_read_count
        ),
        format!("Pages read: {}", format_pages(report.pages_consumed)),
        format!(
            "Average finished book: {}",
            format_pages(report.avg_pages_per_finished)
        ),
    ];

    let favourite = match &facts.favorite_genre_name {
        Some(name) => format!("{name} ({:.0}%)", facts.favorite_genre_percentage),
        None => EM_DASH.to_string(),
    };
    lines.push(format!("Favourite genre: {favourite}"));

    if let Some(current) = report.monthly_progress.last() {
        lines.push(format!(
            "This month: {} finished ({} vs last month)",
            current.count,
            format_percentage_change(facts.monthly_comparison_percentage)
        ));
    }

    let best = facts
        .best_month
        .as_ref()
        .map_or_else(|| EM_DASH.to_string(), |m| format!("{} {} ({})", m.name, m.year, m.count));
    lines.push(format!("Best month: {best}"));

    lines.push(format!(
        "This year: {} finished ({} vs last year)",
        facts.total_books_finished_current_year,
        format_percentage_change(facts.pace_improvement_percentage)
    ));
    lines.push(format!("Shelf length: {:.2} m", facts.total_length_meters));
    lines
}
