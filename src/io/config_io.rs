use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::model::config::Config;

/// Error type for loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse config.toml: {0}")]
    ParseError(#[from] toml::de::Error),
}

pub fn config_path(tick_dir: &Path) -> PathBuf {
    tick_dir.join("config.toml")
}

/// Read `config.toml` from the tick directory. A missing file yields the
/// defaults; a file that exists but does not parse is an error.
pub fn read_config(tick_dir: &Path) -> Result<Config, ConfigError> {
    let path = config_path(tick_dir);
    let text = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Config::default()),
        Err(e) => return Err(ConfigError::ReadError { path, source: e }),
    };
    Ok(toml::from_str(&text)?)
}
