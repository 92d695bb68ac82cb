//! Renders table definitions and their inferred relations into SeaORM code:
//! regenerated base models, user-owned models, query builders and CRUD
//! controller scaffolds.

pub mod error;
pub mod files;
pub mod seaorm;

pub use error::ExportError;
pub use files::{ExportContext, FileKind, GeneratedFile, base_index_file, crud_files, model_files};
pub use seaorm::render_base_model;
