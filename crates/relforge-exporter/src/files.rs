use std::path::{Path, PathBuf};

use relforge_config::{RelforgeConfig, namespace_path};
use relforge_core::{Relations, TableDef};
use relforge_naming::module_name;

use crate::error::ExportError;
use crate::seaorm::{
    render_base_index, render_base_model, render_controller, render_query, render_user_model,
};

/// Namespaces and output root shared by every renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportContext {
    pub src_dir: PathBuf,
    pub model_ns: String,
    pub base_ns: String,
    pub query_ns: String,
    pub controller_ns: String,
    pub generate_query: bool,
}

impl From<&RelforgeConfig> for ExportContext {
    fn from(config: &RelforgeConfig) -> Self {
        Self {
            src_dir: config.src_dir().to_path_buf(),
            model_ns: config.model_ns().to_string(),
            base_ns: config.base_ns().to_string(),
            query_ns: config.query_ns().to_string(),
            controller_ns: config.controller_ns().to_string(),
            generate_query: config.generate_query(),
        }
    }
}

impl ExportContext {
    /// `{namespace dir}/{module}.rs` for `table`.
    pub fn module_path(&self, namespace: &str, table: &str) -> PathBuf {
        namespace_path(namespace, &self.src_dir).join(format!("{}.rs", module_name(table)))
    }

    pub fn base_dir(&self) -> PathBuf {
        namespace_path(&self.base_ns, &self.src_dir)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    BaseModel,
    BaseIndex,
    UserModel,
    Query,
    Controller,
}

impl FileKind {
    pub fn label(self) -> &'static str {
        match self {
            FileKind::BaseModel => "base model",
            FileKind::BaseIndex => "base index",
            FileKind::UserModel => "model",
            FileKind::Query => "query",
            FileKind::Controller => "controller",
        }
    }
}

/// A rendered file and whether it may replace an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub kind: FileKind,
    pub path: PathBuf,
    pub contents: String,
    /// `false` for user-owned files, which are only written when absent.
    pub overwrite: bool,
}

impl GeneratedFile {
    fn new(kind: FileKind, path: PathBuf, contents: String) -> Self {
        let overwrite = matches!(
            kind,
            FileKind::BaseModel | FileKind::BaseIndex | FileKind::Query
        );
        Self {
            kind,
            path,
            contents,
            overwrite,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Files for one table's model: base model, user model and, when enabled,
/// the query builder.
pub fn model_files(
    table: &TableDef,
    relations: Option<&Relations>,
    ctx: &ExportContext,
) -> Result<Vec<GeneratedFile>, ExportError> {
    let mut files = vec![
        GeneratedFile::new(
            FileKind::BaseModel,
            ctx.module_path(&ctx.base_ns, &table.name),
            render_base_model(table, relations, ctx)?,
        ),
        GeneratedFile::new(
            FileKind::UserModel,
            ctx.module_path(&ctx.model_ns, &table.name),
            render_user_model(table, ctx),
        ),
    ];
    if ctx.generate_query {
        files.push(GeneratedFile::new(
            FileKind::Query,
            ctx.module_path(&ctx.query_ns, &table.name),
            render_query(table, ctx)?,
        ));
    }
    Ok(files)
}

/// The CRUD controller scaffold for one table.
pub fn crud_files(table: &TableDef, ctx: &ExportContext) -> Result<Vec<GeneratedFile>, ExportError> {
    Ok(vec![GeneratedFile::new(
        FileKind::Controller,
        ctx.module_path(&ctx.controller_ns, &table.name),
        render_controller(table, ctx)?,
    )])
}

/// `mod.rs` of the base namespace listing `modules`.
pub fn base_index_file<'a>(
    modules: impl IntoIterator<Item = &'a str>,
    ctx: &ExportContext,
) -> GeneratedFile {
    GeneratedFile::new(
        FileKind::BaseIndex,
        ctx.base_dir().join("mod.rs"),
        render_base_index(modules),
    )
}
