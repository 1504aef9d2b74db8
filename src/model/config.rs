use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Configuration from .tick/config.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub items: ItemsConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Name of the slot holding the item list
    #[serde(default = "default_slot")]
    pub slot: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            slot: default_slot(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemsConfig {
    /// Maximum item text length in characters (0 = unlimited)
    #[serde(default = "default_max_text_len")]
    pub max_text_len: usize,
}

impl Default for ItemsConfig {
    fn default() -> Self {
        ItemsConfig {
            max_text_len: default_max_text_len(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UiConfig {
    /// Color overrides by theme key, e.g. `highlight = "#FB4196"`
    #[serde(default)]
    pub colors: HashMap<String, String>,
}

pub const DEFAULT_SLOT: &str = "todos";

pub const DEFAULT_MAX_TEXT_LEN: usize = 500;

fn default_slot() -> String {
    DEFAULT_SLOT.to_string()
}

fn default_max_text_len() -> usize {
    DEFAULT_MAX_TEXT_LEN
}
