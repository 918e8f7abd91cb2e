//! Output formatting utilities

use crate::application::SyncReport;
use crate::domain::{CategoryFilter, Quote};

/// Format quotes for display, one per line
pub fn format_quote_list(quotes: &[&Quote]) -> String {
    if quotes.is_empty() {
        return "No quotes found".to_string();
    }

    let mut output = String::new();
    for quote in quotes {
        output.push_str(&format!("{}\n", quote));
    }
    output
}

/// Format categories, marking the active selection with `*`
pub fn format_category_list(categories: &[String], selection: &CategoryFilter) -> String {
    let marker = |active: bool| if active { "*" } else { " " };

    let mut output = format!(
        "{} all\n",
        marker(*selection == CategoryFilter::All)
    );
    for category in categories {
        let active = matches!(selection, CategoryFilter::Category(c) if c == category);
        output.push_str(&format!("{} {}\n", marker(active), category));
    }
    output
}

pub fn format_sync_report(report: &SyncReport) -> String {
    let pulled = match report.pulled {
        Some(count) => format!("pulled {}", count),
        None => "pull failed".to_string(),
    };
    format!(
        "Sync finished at {}: {}, posted {}, failed {}",
        report.finished_at.format("%Y-%m-%d %H:%M:%S UTC"),
        pulled,
        report.posted,
        report.failed
    )
}
