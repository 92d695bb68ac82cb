use std::{fs, path::PathBuf};

use anyhow::{Context, Result, bail};
use colored::Colorize;
use relforge_config::{FileFormat, RelforgeConfig};
use relforge_loader::CONFIG_FILE;

pub fn cmd_init(format: FileFormat) -> Result<()> {
    let path = PathBuf::from(CONFIG_FILE);
    if path.exists() {
        bail!("{CONFIG_FILE} already exists");
    }

    let config = RelforgeConfig {
        schema_format: format,
        ..Default::default()
    };
    let json = serde_json::to_string_pretty(&config).context("serialize default config")?;
    fs::write(&path, json).with_context(|| format!("write {CONFIG_FILE}"))?;
    println!("{} {}", "Created".bright_green(), path.display());

    let schema_dir = config.schema_dir();
    if !schema_dir.exists() {
        fs::create_dir_all(schema_dir)
            .with_context(|| format!("create schema dir {}", schema_dir.display()))?;
        println!("{} {}", "Created".bright_green(), schema_dir.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::test_support::CwdGuard;
    use tempfile::tempdir;

    #[test]
    #[serial_test::serial]
    fn cmd_init_creates_config_and_schema_dir() {
        let tmp = tempdir().unwrap();
        let _guard = CwdGuard::new(tmp.path());

        cmd_init(FileFormat::Yaml).unwrap();
        assert!(PathBuf::from(CONFIG_FILE).exists());
        assert!(PathBuf::from("schema").is_dir());

        let config = relforge_loader::load_config().unwrap();
        assert_eq!(config.schema_format(), FileFormat::Yaml);
    }

    #[test]
    #[serial_test::serial]
    fn cmd_init_fails_when_exists() {
        let tmp = tempdir().unwrap();
        let _guard = CwdGuard::new(tmp.path());

        cmd_init(FileFormat::Json).unwrap();
        let err = cmd_init(FileFormat::Json).unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }
}
