use chrono::{DateTime, Utc};
use tracing::{debug, warn};
use unicode_segmentation::UnicodeSegmentation;

use crate::io::storage::{FileStorage, Storage, StorageError};
use crate::model::config::Config;
use crate::model::item::{Item, ItemId};

/// Rejected item text
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("text cannot be empty")]
    EmptyText,
    #[error("text is too long: {len} characters (max {max})")]
    TooLong { len: usize, max: usize },
}

/// Error type for store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("item not found: {0}")]
    NotFound(ItemId),
    /// The stored items already use the largest possible id.
    #[error("no ids left after {0}")]
    IdsExhausted(ItemId),
    /// The mutation was applied in memory but could not be saved.
    #[error("could not save items: {0}")]
    Persistence(#[from] StorageError),
}

impl StoreError {
    /// Whether the in-memory change went through despite the error.
    pub fn is_persistence(&self) -> bool {
        matches!(self, StoreError::Persistence(_))
    }
}

/// Trim `text` and check it against the length cap (`0` = no cap).
pub fn validate_text(text: &str, max_len: usize) -> Result<String, ValidationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyText);
    }
    if max_len > 0 {
        let len = trimmed.graphemes(true).count();
        if len > max_len {
            return Err(ValidationError::TooLong { len, max: max_len });
        }
    }
    Ok(trimmed.to_string())
}

/// The authoritative item list and its slot.
///
/// Items are kept most-recent-first. Every successful mutation rewrites the
/// whole slot before returning; when that write fails the change is kept in
/// memory and `StoreError::Persistence` is returned.
pub struct Store<S: Storage = FileStorage> {
    storage: S,
    slot: String,
    max_text_len: usize,
    items: Vec<Item>,
    /// Highest id ever issued or loaded; never decreases
    last_id: ItemId,
    clock: fn() -> DateTime<Utc>,
}

impl<S: Storage> Store<S> {
    /// An empty store over `storage`. Call [`Store::load`] to read the slot.
    pub fn new(storage: S, config: &Config) -> Self {
        Store {
            storage,
            slot: config.storage.slot.clone(),
            max_text_len: config.items.max_text_len,
            items: Vec::new(),
            last_id: 0,
            clock: Utc::now,
        }
    }

    /// Construct and load in one step.
    pub fn open(storage: S, config: &Config) -> Self {
        let mut store = Self::new(storage, config);
        store.load();
        store
    }

    /// Replace the time source used for ids and `created_at`.
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    /// Read the slot into memory. Absent, unreadable or malformed data
    /// leaves the store empty; it is never an error.
    pub fn load(&mut self) -> &[Item] {
        self.items = match self.storage.get(&self.slot) {
            Ok(Some(raw)) if raw.trim().is_empty() => Vec::new(),
            Ok(Some(raw)) => match serde_json::from_str::<Option<Vec<Item>>>(&raw) {
                Ok(items) => items.unwrap_or_default(),
                Err(e) => {
                    warn!(slot = %self.slot, error = %e, "discarding malformed items");
                    self.storage.stash_unreadable(&self.slot, &raw);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(slot = %self.slot, error = %e, "could not read items");
                Vec::new()
            }
        };
        let max_loaded = self.items.iter().map(|item| item.id).max().unwrap_or(0);
        self.last_id = self.last_id.max(max_loaded);
        debug!(slot = %self.slot, count = self.items.len(), "loaded items");
        &self.items
    }

    /// Current items, most recent first.
    pub fn snapshot(&self) -> &[Item] {
        &self.items
    }

    pub fn get(&self, id: ItemId) -> Result<&Item, StoreError> {
        self.items
            .iter()
            .find(|item| item.id == id)
            .ok_or(StoreError::NotFound(id))
    }

    /// Add a new item at the front.
    pub fn add(&mut self, text: &str) -> Result<Item, StoreError> {
        let text = validate_text(text, self.max_text_len)?;
        let created_at = self.now();
        let id = self.next_id(created_at)?;
        let item = Item::new(id, text, created_at);
        self.items.insert(0, item.clone());
        debug!(id, "added item");
        self.persist()?;
        Ok(item)
    }

    /// Flip the completion flag of an item.
    pub fn toggle(&mut self, id: ItemId) -> Result<Item, StoreError> {
        let item = self.find_mut(id)?;
        item.completed = !item.completed;
        let item = item.clone();
        debug!(id, completed = item.completed, "toggled item");
        self.persist()?;
        Ok(item)
    }

    /// Remove an item, returning it.
    pub fn remove(&mut self, id: ItemId) -> Result<Item, StoreError> {
        let index = self
            .items
            .iter()
            .position(|item| item.id == id)
            .ok_or(StoreError::NotFound(id))?;
        let item = self.items.remove(index);
        debug!(id, "removed item");
        self.persist()?;
        Ok(item)
    }

    /// Replace the text of an item. The text is validated before the id is
    /// looked up.
    pub fn edit(&mut self, id: ItemId, new_text: &str) -> Result<Item, StoreError> {
        let text = validate_text(new_text, self.max_text_len)?;
        let item = self.find_mut(id)?;
        item.text = text;
        let item = item.clone();
        debug!(id, "edited item");
        self.persist()?;
        Ok(item)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    pub fn max_text_len(&self) -> usize {
        self.max_text_len
    }

    fn find_mut(&mut self, id: ItemId) -> Result<&mut Item, StoreError> {
        self.items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or(StoreError::NotFound(id))
    }

    /// Current time truncated to milliseconds, the precision that survives
    /// a round trip through the slot.
    fn now(&self) -> DateTime<Utc> {
        let now = (self.clock)();
        DateTime::from_timestamp_millis(now.timestamp_millis()).unwrap_or(now)
    }

    fn next_id(&mut self, created_at: DateTime<Utc>) -> Result<ItemId, StoreError> {
        let millis = u64::try_from(created_at.timestamp_millis()).unwrap_or(0);
        let after_last = self
            .last_id
            .checked_add(1)
            .ok_or(StoreError::IdsExhausted(self.last_id))?;
        let id = millis.max(after_last);
        self.last_id = id;
        Ok(id)
    }

    fn persist(&mut self) -> Result<(), StoreError> {
        let payload = serde_json::to_string(&self.items).map_err(StorageError::from)?;
        if let Err(e) = self.storage.set(&self.slot, &payload) {
            warn!(slot = %self.slot, error = %e, "could not save items");
            return Err(e.into());
        }
        Ok(())
    }
}
