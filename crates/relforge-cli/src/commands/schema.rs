use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use colored::Colorize;
use relforge_config::RelforgeConfig;
use relforge_core::TableDef;
use schemars::{Schema, schema_for};

/// Write JSON Schemas for table files and relforge.json into `out`.
pub fn cmd_schema(out: PathBuf) -> Result<()> {
    if !out.exists() {
        fs::create_dir_all(&out).with_context(|| format!("create dir {}", out.display()))?;
    }

    let table_path = out.join("table.schema.json");
    let config_path = out.join("config.schema.json");
    write_schema(&table_path, &schema_for!(TableDef))?;
    write_schema(&config_path, &schema_for!(RelforgeConfig))?;

    println!("{}", "Wrote schemas:".bright_cyan().bold());
    println!("  {}", table_path.display().to_string().bright_white());
    println!("  {}", config_path.display().to_string().bright_white());
    Ok(())
}

fn write_schema(path: &Path, schema: &Schema) -> Result<()> {
    let json = serde_json::to_string_pretty(schema)
        .with_context(|| format!("serialize {}", path.display()))?;
    fs::write(path, json).with_context(|| format!("write {}", path.display()))
}
