use chrono::{DateTime, Utc};

use crate::models::HistoryEntry;

/// Number of code characters shown in a history summary line
const PREVIEW_CHARS: usize = 50;
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One-line summary for the history list. `index` is zero-based; the line
/// shows it one-based. Line breaks in the code preview become spaces.
///
/// `[1] 2025-11-02 09:41:20 - Find Bugs (m1): print(1)...`
pub fn history_summary(index: usize, entry: &HistoryEntry) -> String {
    let preview: String = entry
        .code()
        .chars()
        .take(PREVIEW_CHARS)
        .map(|c| if c.is_whitespace() { ' ' } else { c })
        .collect();
    let flag = if entry.extraction_failed() { " [extraction failed]" } else { "" };
    format!(
        "[{}] {} - {} ({}){}: {}...",
        index + 1,
        entry.timestamp().format(TIMESTAMP_FORMAT),
        entry.analysis_type(),
        entry.model(),
        flag,
        preview
    )
}

/// Full record for a detail view: metadata line, input code, response
pub fn history_detail(index: usize, entry: &HistoryEntry) -> String {
    format!(
        "History Entry {}\nType: {} | Model: {} | Time: {} ({})\n\n--- Input Code ---\n{}\n\n--- AI Response ---\n{}\n",
        index + 1,
        entry.analysis_type(),
        entry.model(),
        entry.timestamp().format(TIMESTAMP_FORMAT),
        format_age(&entry.timestamp()),
        entry.code(),
        entry.response()
    )
}

/// Relative age of a timestamp: "just now", "5m ago", "3h ago", "2d ago"
pub fn format_age(timestamp: &DateTime<Utc>) -> String {
    let seconds = Utc::now().signed_duration_since(*timestamp).num_seconds().max(0);
    let minutes = seconds / 60;
    let hours = minutes / 60;
    let days = hours / 24;

    if days > 0 {
        format!("{}d ago", days)
    } else if hours > 0 {
        format!("{}h ago", hours)
    } else if minutes > 0 {
        format!("{}m ago", minutes)
    } else {
        "just now".to_string()
    }
}
