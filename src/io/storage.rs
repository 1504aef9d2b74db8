use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::io::recovery::{self, RecoveryCategory, RecoveryEntry};

/// Error type for slot reads and writes
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not write {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("storage quota exceeded: {needed} bytes needed, {quota} available")]
    QuotaExceeded { needed: usize, quota: usize },
    #[error("could not serialize items: {0}")]
    SerializeError(#[from] serde_json::Error),
}

/// Named string slots, read whole and overwritten whole.
///
/// The store is the only reader and writer of its slot, so implementations
/// need no coordination beyond making each `set` all-or-nothing.
pub trait Storage {
    /// Read a slot. An absent slot is `Ok(None)`, not an error.
    fn get(&self, slot: &str) -> Result<Option<String>, StorageError>;

    /// Replace the contents of a slot.
    fn set(&mut self, slot: &str, value: &str) -> Result<(), StorageError>;

    /// Keep a copy of a payload that could not be parsed, before the next
    /// write replaces it. Backends without a side channel drop it.
    fn stash_unreadable(&self, _slot: &str, _raw: &str) {}
}

// ---------------------------------------------------------------------------
// File-backed slots
// ---------------------------------------------------------------------------

/// Slots stored as `<dir>/<slot>.json`, written atomically.
///
/// Failed writes and unreadable payloads go to the recovery log in `dir`.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStorage { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn slot_path(&self, slot: &str) -> PathBuf {
        self.dir.join(format!("{}.json", slot))
    }
}

impl Storage for FileStorage {
    fn get(&self, slot: &str) -> Result<Option<String>, StorageError> {
        let path = self.slot_path(slot);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::ReadError { path, source: e }),
        }
    }

    fn set(&mut self, slot: &str, value: &str) -> Result<(), StorageError> {
        let path = self.slot_path(slot);
        let result = fs::create_dir_all(&self.dir)
            .and_then(|()| recovery::atomic_write(&path, value.as_bytes()));
        if let Err(e) = result {
            recovery::log_recovery(
                &self.dir,
                RecoveryEntry {
                    timestamp: Utc::now(),
                    category: RecoveryCategory::Write,
                    description: "slot write failed".to_string(),
                    fields: vec![
                        ("Slot".to_string(), slot.to_string()),
                        ("Error".to_string(), e.to_string()),
                    ],
                    body: value.to_string(),
                },
            );
            return Err(StorageError::WriteError { path, source: e });
        }
        Ok(())
    }

    fn stash_unreadable(&self, slot: &str, raw: &str) {
        recovery::log_recovery(
            &self.dir,
            RecoveryEntry {
                timestamp: Utc::now(),
                category: RecoveryCategory::Parser,
                description: "unreadable slot discarded".to_string(),
                fields: vec![("Slot".to_string(), slot.to_string())],
                body: raw.to_string(),
            },
        );
    }
}

// ---------------------------------------------------------------------------
// In-memory slots
// ---------------------------------------------------------------------------

/// Slots held in a map, with an optional byte quota on the total size.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slots: HashMap<String, String>,
    quota: Option<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject writes that would push the total stored bytes past `quota`.
    pub fn with_quota(quota: usize) -> Self {
        MemoryStorage {
            slots: HashMap::new(),
            quota: Some(quota),
        }
    }

    /// Seed a slot directly, bypassing the quota.
    pub fn insert(&mut self, slot: &str, value: impl Into<String>) {
        self.slots.insert(slot.to_string(), value.into());
    }

    pub fn raw(&self, slot: &str) -> Option<&str> {
        self.slots.get(slot).map(|s| s.as_str())
    }

    pub fn set_quota(&mut self, quota: Option<usize>) {
        self.quota = quota;
    }
}

impl Storage for MemoryStorage {
    fn get(&self, slot: &str) -> Result<Option<String>, StorageError> {
        Ok(self.slots.get(slot).cloned())
    }

    fn set(&mut self, slot: &str, value: &str) -> Result<(), StorageError> {
        if let Some(quota) = self.quota {
            let others: usize = self
                .slots
                .iter()
                .filter(|(name, _)| name.as_str() != slot)
                .map(|(_, v)| v.len())
                .sum();
            let needed = others + value.len();
            if needed > quota {
                return Err(StorageError::QuotaExceeded { needed, quota });
            }
        }
        self.slots.insert(slot.to_string(), value.to_string());
        Ok(())
    }
}
