use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use relforge_config::{FileFormat, RelforgeConfig};
use relforge_core::TableDef;
use relforge_relation::InMemorySchemaProvider;
use tracing::debug;

/// Load every table snapshot under the configured schema directory.
pub fn load_tables(config: &RelforgeConfig) -> Result<Vec<TableDef>> {
    load_tables_from_dir(config.schema_dir())
}

/// Load table files (`.json`, `.yaml`, `.yml`) under `dir`, recursively.
///
/// Files are visited in path order so repeated loads yield the same table
/// order. A missing directory yields no tables; two files defining the same
/// table identifier is an error.
pub fn load_tables_from_dir(dir: &Path) -> Result<Vec<TableDef>> {
    if !dir.exists() {
        debug!(dir = %dir.display(), "schema directory missing, no tables loaded");
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    collect_files(dir, &mut files)?;
    files.sort_by(|a, b| a.0.cmp(&b.0));

    let mut seen = HashSet::new();
    let mut tables = Vec::with_capacity(files.len());
    for (path, format) in files {
        let table = read_table(&path, format)?;
        if !seen.insert(table.name.clone()) {
            anyhow::bail!(
                "table '{}' is defined more than once (again in {})",
                table.name,
                path.display()
            );
        }
        debug!(table = %table.name, file = %path.display(), "table loaded");
        tables.push(table);
    }
    Ok(tables)
}

/// Schema provider over the configured snapshot directory.
pub fn load_provider(config: &RelforgeConfig) -> Result<InMemorySchemaProvider> {
    Ok(InMemorySchemaProvider::new(load_tables(config)?))
}

fn collect_files(dir: &Path, files: &mut Vec<(PathBuf, FileFormat)>) -> Result<()> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("read schema directory: {}", dir.display()))?;

    for entry in entries {
        let entry = entry.context("read directory entry")?;
        let path = entry.path();

        if path.is_dir() {
            collect_files(&path, files)?;
            continue;
        }

        let format = path
            .extension()
            .and_then(|s| s.to_str())
            .and_then(FileFormat::from_extension);
        if let Some(format) = format {
            if path.is_file() {
                files.push((path, format));
            }
        }
    }
    Ok(())
}

fn read_table(path: &Path, format: FileFormat) -> Result<TableDef> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("read table file: {}", path.display()))?;
    let table = match format {
        FileFormat::Json => serde_json::from_str(&content)
            .with_context(|| format!("parse JSON table: {}", path.display()))?,
        FileFormat::Yaml | FileFormat::Yml => serde_yaml::from_str(&content)
            .with_context(|| format!("parse YAML table: {}", path.display()))?,
    };
    Ok(table)
}
