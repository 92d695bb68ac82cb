use anyhow::{Context, Result, bail};
use colored::Colorize;
use relforge_exporter::{ExportContext, crud_files};

use crate::utils::{load_project, report, write_generated};

pub fn cmd_crud(table: String, force: bool) -> Result<()> {
    let project = load_project()?;
    let Some(def) = project.provider.tables().find(|t| t.name == table) else {
        bail!(
            "table '{}' not found in {}",
            table,
            project.config.schema_dir().display()
        );
    };

    let ctx = ExportContext::from(&project.config);
    let files = crud_files(def, &ctx).with_context(|| format!("generate CRUD for '{table}'"))?;
    for file in &files {
        report(file, write_generated(file, force)?);
    }

    let model = ctx.module_path(&ctx.model_ns, &def.name);
    if !model.exists() {
        println!(
            "{} {} {}",
            "Note:".bright_cyan(),
            model.display().to_string().bright_white(),
            format!("does not exist yet; run `relforge model {table}`").bright_white()
        );
    }
    Ok(())
}
