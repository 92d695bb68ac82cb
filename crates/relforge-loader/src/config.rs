use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use relforge_config::RelforgeConfig;

pub const CONFIG_FILE: &str = "relforge.json";

/// Load relforge.json from the current directory.
pub fn load_config() -> Result<RelforgeConfig> {
    let path = PathBuf::from(CONFIG_FILE);
    if !path.exists() {
        anyhow::bail!("{CONFIG_FILE} not found. Run 'relforge init' first.");
    }
    read_config(&path)
}

/// Load config from a specific path.
pub fn load_config_from_path(path: PathBuf) -> Result<RelforgeConfig> {
    if !path.exists() {
        anyhow::bail!("{CONFIG_FILE} not found at: {}", path.display());
    }
    read_config(&path)
}

/// Load config from project root, with fallback to defaults.
pub fn load_config_or_default(project_root: Option<PathBuf>) -> Result<RelforgeConfig> {
    let config_path = match project_root {
        Some(root) => root.join(CONFIG_FILE),
        None => PathBuf::from(CONFIG_FILE),
    };

    if config_path.exists() {
        load_config_from_path(config_path)
    } else {
        Ok(RelforgeConfig::default())
    }
}

fn read_config(path: &Path) -> Result<RelforgeConfig> {
    let content = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let config: RelforgeConfig =
        serde_json::from_str(&content).with_context(|| format!("parse {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("invalid configuration in {}", path.display()))?;
    Ok(config)
}
