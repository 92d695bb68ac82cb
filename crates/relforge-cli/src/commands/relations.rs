use anyhow::{Context, Result};
use colored::Colorize;
use relforge_core::{RelationDescriptor, RelationMap};

use crate::utils::{infer, load_project, table_selector};

pub fn cmd_relations(tables: Vec<String>, json: bool) -> Result<()> {
    let project = load_project()?;
    let selector = table_selector(&project.config, tables);
    let shown: RelationMap = infer(&project)?
        .into_iter()
        .filter(|(table, _)| selector.matches(table))
        .collect();

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&shown).context("serialize relations")?
        );
        return Ok(());
    }

    if shown.is_empty() {
        println!("{}", "No relations inferred.".bright_yellow());
        return Ok(());
    }

    for (table, relations) in &shown {
        println!(
            "{} {}",
            table.bright_cyan().bold(),
            format!("({})", relations.len()).bright_yellow()
        );
        for (name, relation) in relations {
            println!("  {} {}", name.bright_white().bold(), describe(relation));
        }
    }
    Ok(())
}

/// One-line summary: cardinality, target, and how the tables are joined.
fn describe(relation: &RelationDescriptor) -> String {
    let cardinality = if relation.cardinality.is_many() {
        "many"
    } else {
        "one"
    };
    let mut out = format!("-> {} {}", cardinality, relation.target_table);
    match &relation.via {
        Some(via) => out.push_str(&format!(" via {}", via.table)),
        None => {
            let pairs: Vec<String> = relation
                .link
                .iter()
                .map(|(own, target)| format!("{own} = {target}"))
                .collect();
            out.push_str(&format!(" on {}", pairs.join(", ")));
        }
    }
    if let Some(inverse) = &relation.inverse_of {
        out.push_str(&format!(" (inverse of {inverse})"));
    }
    out
}
