use std::path::{Path, PathBuf};

use crate::io::config_io::{self, ConfigError};
use crate::io::storage::FileStorage;
use crate::model::config::Config;
use crate::ops::store::Store;

/// Name of the directory holding items, config and logs.
pub const TICK_DIR: &str = ".tick";

/// A resolved `.tick/` directory and its configuration.
#[derive(Debug, Clone)]
pub struct Workspace {
    pub dir: PathBuf,
    pub config: Config,
}

/// Directory to start discovery from: `dir` when given (`-C`), otherwise
/// the working directory.
pub fn resolve_start(dir: Option<&str>) -> Result<PathBuf, String> {
    match dir {
        Some(d) => std::fs::canonicalize(d)
            .map_err(|e| format!("cannot resolve -C path '{}': {}", d, e)),
        None => std::env::current_dir().map_err(|e| format!("cannot read working directory: {}", e)),
    }
}

/// Find the nearest `.tick/` directory at or above `start`. When there is
/// none, `start/.tick` is returned; it is created on first write.
pub fn discover_tick_dir(start: &Path) -> PathBuf {
    let mut current = start.to_path_buf();
    loop {
        let candidate = current.join(TICK_DIR);
        if candidate.is_dir() {
            return candidate;
        }
        if !current.pop() {
            return start.join(TICK_DIR);
        }
    }
}

impl Workspace {
    /// Discover the tick directory from `start` and load its config.
    pub fn open(start: &Path) -> Result<Self, ConfigError> {
        let dir = discover_tick_dir(start);
        let config = config_io::read_config(&dir)?;
        Ok(Workspace { dir, config })
    }

    /// Build a store over this workspace's slot and load it.
    pub fn open_store(&self) -> Store<FileStorage> {
        Store::open(FileStorage::new(&self.dir), &self.config)
    }
}
