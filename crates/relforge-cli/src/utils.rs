use std::fs;

use anyhow::{Context, Result};
use colored::Colorize;
use relforge_config::{RelforgeConfig, TableSelector};
use relforge_core::RelationMap;
use relforge_exporter::GeneratedFile;
use relforge_loader::{load_config, load_provider};
use relforge_relation::{InMemorySchemaProvider, InferenceOptions, Scope, infer_relations};
use tracing::debug;

/// Configuration plus the tables it points at.
pub struct Project {
    pub config: RelforgeConfig,
    pub provider: InMemorySchemaProvider,
}

pub fn load_project() -> Result<Project> {
    let config = load_config()?;
    let provider = load_provider(&config)?;
    debug!(tables = provider.len(), "schema snapshot loaded");
    Ok(Project { config, provider })
}

/// Infer relations over every configured schema. Entity references point at
/// the base namespace, whose index re-exports each entity.
pub fn infer(project: &Project) -> Result<RelationMap> {
    let options = InferenceOptions {
        relations: project.config.relations(),
        namespace: project.config.base_ns().to_string(),
    };
    let scope = Scope::Schemas(project.config.schemas());
    infer_relations(&project.provider, &scope, &options).context("infer relations")
}

/// Patterns given on the command line win over the configured ones.
pub fn table_selector(config: &RelforgeConfig, patterns: Vec<String>) -> TableSelector {
    if patterns.is_empty() {
        config.table_selector()
    } else {
        TableSelector::new(patterns)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Written,
    Unchanged,
    /// A user-owned file already existed and was left alone.
    Kept,
}

pub fn write_generated(file: &GeneratedFile, force: bool) -> Result<WriteOutcome> {
    let path = file.path();
    if path.exists() {
        if !file.overwrite && !force {
            return Ok(WriteOutcome::Kept);
        }
        let current =
            fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        if current == file.contents {
            return Ok(WriteOutcome::Unchanged);
        }
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create parent dir {}", parent.display()))?;
    }
    fs::write(path, &file.contents).with_context(|| format!("write {}", path.display()))?;
    Ok(WriteOutcome::Written)
}

pub fn report(file: &GeneratedFile, outcome: WriteOutcome) {
    let status = match outcome {
        WriteOutcome::Written => "Wrote".bright_green(),
        WriteOutcome::Unchanged => "Unchanged".bright_white(),
        WriteOutcome::Kept => "Kept".bright_yellow(),
    };
    println!(
        "{} {} {}",
        status,
        file.kind.label().cyan(),
        file.path().display().to_string().bright_white()
    );
}


#[cfg(test)]
mod tests {
    use super::test_support::{CwdGuard, write_blog_project};
    use super::*;
    use relforge_exporter::FileKind;
    use serial_test::serial;
    use tempfile::tempdir;

    fn file(overwrite: bool, contents: &str) -> GeneratedFile {
        GeneratedFile {
            kind: FileKind::UserModel,
            path: "out/model.rs".into(),
            contents: contents.into(),
            overwrite,
        }
    }

    #[test]
    #[serial]
    fn user_owned_files_are_kept() {
        let tmp = tempdir().unwrap();
        let _guard = CwdGuard::new(tmp.path());

        assert_eq!(write_generated(&file(false, "v1"), false).unwrap(), WriteOutcome::Written);
        assert_eq!(write_generated(&file(false, "v2"), false).unwrap(), WriteOutcome::Kept);
        assert_eq!(fs::read_to_string("out/model.rs").unwrap(), "v1");

        assert_eq!(write_generated(&file(false, "v2"), true).unwrap(), WriteOutcome::Written);
        assert_eq!(fs::read_to_string("out/model.rs").unwrap(), "v2");
    }

    #[test]
    #[serial]
    fn regenerated_files_report_unchanged() {
        let tmp = tempdir().unwrap();
        let _guard = CwdGuard::new(tmp.path());

        assert_eq!(write_generated(&file(true, "same"), false).unwrap(), WriteOutcome::Written);
        assert_eq!(write_generated(&file(true, "same"), false).unwrap(), WriteOutcome::Unchanged);
        assert_eq!(write_generated(&file(true, "new"), false).unwrap(), WriteOutcome::Written);
    }

    #[test]
    fn command_line_patterns_override_config() {
        let config = RelforgeConfig {
            tables: vec!["user".into()],
            ..Default::default()
        };
        assert!(table_selector(&config, vec![]).matches("user"));
        assert!(!table_selector(&config, vec![]).matches("post"));
        assert!(table_selector(&config, vec!["post*".into()]).matches("post_tag"));
    }

    #[test]
    #[serial]
    fn infer_uses_base_namespace() {
        let tmp = tempdir().unwrap();
        let _guard = CwdGuard::new(tmp.path());
        write_blog_project(&RelforgeConfig::default());

        let project = load_project().unwrap();
        let relations = infer(&project).unwrap();
        assert_eq!(
            relations["post"]["author"].target_entity,
            "crate::models::base::User"
        );
        assert!(relations["post"].contains_key("tags"));
    }
}
