use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of an item: creation time in milliseconds, bumped when two
/// items are created within the same millisecond.
pub type ItemId = u64;

/// A single list entry, in the shape it is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: ItemId,
    /// Trimmed, non-empty text
    pub text: String,
    pub completed: bool,
    /// Set once at construction, millisecond precision
    pub created_at: DateTime<Utc>,
}

impl Item {
    pub fn new(id: ItemId, text: String, created_at: DateTime<Utc>) -> Self {
        Item {
            id,
            text,
            completed: false,
            created_at,
        }
    }

    /// "Completed" or "Active", as shown in the detail view
    pub fn status_label(&self) -> &'static str {
        if self.completed { "Completed" } else { "Active" }
    }
}

/// Which items a view shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    #[default]
    All,
    Active,
    Completed,
}

impl Filter {
    /// All filters in tab order
    pub const ALL: [Filter; 3] = [Filter::All, Filter::Active, Filter::Completed];

    pub fn matches(self, item: &Item) -> bool {
        match self {
            Filter::All => true,
            Filter::Active => !item.completed,
            Filter::Completed => item.completed,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Filter::All => "all",
            Filter::Active => "active",
            Filter::Completed => "completed",
        }
    }

    /// Next filter in tab order, wrapping around
    pub fn next(self) -> Filter {
        match self {
            Filter::All => Filter::Active,
            Filter::Active => Filter::Completed,
            Filter::Completed => Filter::All,
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Filter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Filter::All),
            "active" => Ok(Filter::Active),
            "completed" | "done" => Ok(Filter::Completed),
            _ => Err(format!(
                "unknown filter '{}' (expected: all, active, completed)",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> Item {
        Item::new(
            1714557600000,
            "Buy milk".into(),
            Utc.timestamp_millis_opt(1714557600123).unwrap(),
        )
    }

    #[test]
    fn serializes_with_camel_case_and_iso_timestamp() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert_eq!(
            json,
            r#"{"id":1714557600000,"text":"Buy milk","completed":false,"createdAt":"2024-05-01T10:00:00.123Z"}"#
        );
    }

    #[test]
    fn deserializes_browser_payload() {
        let raw = r#"[{"id":1700000000000,"text":"Walk dog","completed":true,"createdAt":"2023-11-14T22:13:20.000Z"}]"#;
        let items: Vec<Item> = serde_json::from_str(raw).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, 1700000000000);
        assert!(items[0].completed);
        assert_eq!(items[0].created_at.timestamp_millis(), 1700000000000);
    }

    #[test]
    fn filter_matches() {
        let mut item = sample();
        assert!(Filter::All.matches(&item));
        assert!(Filter::Active.matches(&item));
        assert!(!Filter::Completed.matches(&item));
        item.completed = true;
        assert!(Filter::All.matches(&item));
        assert!(!Filter::Active.matches(&item));
        assert!(Filter::Completed.matches(&item));
    }

    #[test]
    fn filter_parse_and_display() {
        for f in Filter::ALL {
            assert_eq!(f.to_string().parse::<Filter>(), Ok(f));
        }
        assert_eq!("done".parse::<Filter>(), Ok(Filter::Completed));
        assert!("everything".parse::<Filter>().is_err());
    }

    #[test]
    fn filter_cycles() {
        assert_eq!(Filter::default(), Filter::All);
        assert_eq!(Filter::All.next().next().next(), Filter::All);
    }
}
