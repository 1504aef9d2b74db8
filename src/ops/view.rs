//! Derived display data: filtered item lists and counts.
//!
//! Both functions are pure and keep the snapshot's order.

use serde::Serialize;

use crate::model::item::{Filter, Item};

/// Item counts for the stats line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Counts {
    pub total: usize,
    pub active: usize,
    pub completed: usize,
}

/// Items the filter selects, in snapshot order.
pub fn filtered(snapshot: &[Item], filter: Filter) -> Vec<&Item> {
    snapshot.iter().filter(|item| filter.matches(item)).collect()
}

/// Total, active and completed counts. `active + completed == total`.
pub fn counts(snapshot: &[Item]) -> Counts {
    let completed = snapshot.iter().filter(|item| item.completed).count();
    Counts {
        total: snapshot.len(),
        active: snapshot.len() - completed,
        completed,
    }
}

/// Number of items a filter would show, for tab labels.
pub fn count_for(counts: Counts, filter: Filter) -> usize {
    match filter {
        Filter::All => counts.total,
        Filter::Active => counts.active,
        Filter::Completed => counts.completed,
    }
}
