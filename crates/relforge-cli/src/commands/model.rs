use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use relforge_core::TableDef;
use relforge_exporter::{ExportContext, FileKind, base_index_file, model_files};
use tracing::warn;

use crate::utils::{infer, load_project, report, table_selector, write_generated};

pub fn cmd_model(tables: Vec<String>, force: bool) -> Result<()> {
    let project = load_project()?;
    let relations = infer(&project)?;
    let ctx = ExportContext::from(&project.config);
    let selector = table_selector(&project.config, tables);

    let selected: Vec<&TableDef> = project
        .provider
        .tables()
        .filter(|t| selector.matches(&t.name))
        .collect();
    if selected.is_empty() {
        println!("{}", "No tables matched.".bright_yellow());
        return Ok(());
    }

    let base_dir = ctx.base_dir();
    let mut modules = existing_modules(&base_dir)?;
    for table in selected {
        let files = match model_files(table, relations.get(&table.name), &ctx) {
            Ok(files) => files,
            Err(err) => {
                warn!(table = %table.name, error = %err, "table skipped");
                println!("{} {}: {}", "Skipped".bright_yellow(), table.name, err);
                continue;
            }
        };
        for file in &files {
            if file.kind == FileKind::BaseModel {
                if let Some(stem) = file.path().file_stem().and_then(|s| s.to_str()) {
                    modules.insert(stem.to_string());
                }
            }
            report(file, write_generated(file, force)?);
        }
    }

    if !modules.is_empty() {
        let index = base_index_file(modules.iter().map(String::as_str), &ctx);
        report(&index, write_generated(&index, true)?);
    }
    Ok(())
}

/// Module names of base models already on disk, so the index keeps them
/// when only some tables are regenerated.
fn existing_modules(dir: &Path) -> Result<BTreeSet<String>> {
    let mut modules = BTreeSet::new();
    if !dir.is_dir() {
        return Ok(modules);
    }
    let entries = fs::read_dir(dir).with_context(|| format!("read dir {}", dir.display()))?;
    for entry in entries {
        let path = entry.context("read directory entry")?.path();
        if path.extension().and_then(|e| e.to_str()) != Some("rs") {
            continue;
        }
        match path.file_stem().and_then(|s| s.to_str()) {
            Some("mod") | None => {}
            Some(stem) => {
                modules.insert(stem.to_string());
            }
        }
    }
    Ok(modules)
}
