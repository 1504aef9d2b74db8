use serde::Serialize;

use crate::io::recovery::RecoveryEntry;
use crate::model::item::{Filter, Item};
use crate::ops::view::Counts;
use crate::util::date;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct ListJson<'a> {
    pub filter: Filter,
    pub items: Vec<&'a Item>,
    pub counts: Counts,
}

#[derive(Serialize)]
pub struct RecoveryEntryJson {
    pub timestamp: String,
    pub category: String,
    pub description: String,
    pub fields: Vec<(String, String)>,
    pub body: String,
}

pub fn recovery_to_json(entry: &RecoveryEntry) -> RecoveryEntryJson {
    RecoveryEntryJson {
        timestamp: entry.timestamp.to_rfc3339(),
        category: entry.category.to_string(),
        description: entry.description.clone(),
        fields: entry.fields.clone(),
        body: entry.body.clone(),
    }
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

fn check_char(item: &Item) -> char {
    if item.completed { 'x' } else { ' ' }
}

/// One-line summary: `[x] <id>  <text>`
pub fn format_item_line(item: &Item) -> String {
    format!("[{}] {}  {}", check_char(item), item.id, item.text)
}

/// Full view of a single item
pub fn format_item_detail(item: &Item) -> Vec<String> {
    vec![
        item.text.clone(),
        String::new(),
        format!("status: {}", item.status_label()),
        format!("created: {}", date::format_local(&item.created_at)),
        format!("id: {}", item.id),
    ]
}

/// `2 total, 1 active, 1 completed`
pub fn format_counts(counts: &Counts) -> String {
    format!(
        "{} total, {} active, {} completed",
        counts.total, counts.active, counts.completed
    )
}

/// Item lines for a filter, followed by the counts line.
pub fn format_listing(items: &[&Item], filter: Filter, counts: &Counts) -> Vec<String> {
    let mut lines = Vec::new();
    if items.is_empty() {
        let msg = match filter {
            Filter::All => "No todos yet. Add one with `tick add <text>`.",
            Filter::Active => "No active todos.",
            Filter::Completed => "No completed todos.",
        };
        lines.push(msg.to_string());
    } else {
        lines.extend(items.iter().map(|item| format_item_line(item)));
    }
    lines.push(String::new());
    lines.push(format_counts(counts));
    lines
}

pub fn format_recovery_entry(entry: &RecoveryEntry) -> Vec<String> {
    let mut lines = vec![format!(
        "{}  {}  {}",
        entry
            .timestamp
            .to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
        entry.category,
        entry.description
    )];
    for (key, value) in &entry.fields {
        lines.push(format!("  {}: {}", key, value));
    }
    for line in entry.body.lines() {
        lines.push(format!("    {}", line));
    }
    lines
}
