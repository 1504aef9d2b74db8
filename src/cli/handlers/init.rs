use std::error::Error;
use std::fs;
use std::path::Path;

use crate::cli::commands::InitArgs;
use crate::io::config_io;
use crate::io::workspace::TICK_DIR;

pub(crate) const CONFIG_TEMPLATE: &str = r##"# tick configuration

[storage]
# Items are kept in <slot>.json next to this file
slot = "todos"

[items]
# Longest accepted item text, in characters (0 = no limit)
max_text_len = 500

# --- UI Customization ---
# Uncomment and edit to override defaults.
#
# [ui.colors]
# background = "#0C001B"
# text = "#B0AAFF"
# text_bright = "#FFFFFF"
# highlight = "#FB4196"
# dim = "#7D78BF"
# red = "#FF4444"
# yellow = "#FFD700"
# green = "#44FF88"
"##;

/// Create `.tick/` in `start` with a default `config.toml`.
pub fn cmd_init(args: InitArgs, start: &Path) -> Result<(), Box<dyn Error>> {
    let tick_dir = start.join(TICK_DIR);
    let config_path = config_io::config_path(&tick_dir);

    if config_path.exists() && !args.force {
        return Err(format!(
            "{} already exists (use --force to overwrite)",
            config_path.display()
        )
        .into());
    }

    fs::create_dir_all(&tick_dir)?;
    fs::write(&config_path, CONFIG_TEMPLATE)?;
    println!("Initialized {}", tick_dir.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::config::Config;
    use tempfile::TempDir;

    #[test]
    fn template_parses_to_defaults() {
        let config: Config = toml::from_str(CONFIG_TEMPLATE).unwrap();
        assert_eq!(config.storage.slot, "todos");
        assert_eq!(config.items.max_text_len, 500);
        assert!(config.ui.colors.is_empty());
    }

    #[test]
    fn init_creates_config_and_refuses_second_run() {
        let tmp = TempDir::new().unwrap();
        cmd_init(InitArgs { force: false }, tmp.path()).unwrap();
        assert!(tmp.path().join(".tick/config.toml").exists());

        assert!(cmd_init(InitArgs { force: false }, tmp.path()).is_err());
        assert!(cmd_init(InitArgs { force: true }, tmp.path()).is_ok());
    }
}
