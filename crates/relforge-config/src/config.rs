use std::path::{Path, PathBuf};

use relforge_core::InverseRelationSettings;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::file_format::FileFormat;
use crate::namespace::{normalize_namespace, validate_namespace};
use crate::selector::TableSelector;

/// Top-level relforge configuration, read from `relforge.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase", default)]
pub struct RelforgeConfig {
    /// Directory holding one JSON/YAML file per table.
    pub schema_dir: PathBuf,
    /// Root of the crate that generated modules are written into.
    pub src_dir: PathBuf,
    /// Table patterns to generate code for. Empty selects every table.
    pub tables: Vec<String>,
    /// Schemas scanned for foreign keys. `""` is the default schema.
    pub schemas: Vec<String>,
    pub relations: InverseRelationSettings,
    /// Namespace of user-editable model modules.
    pub model_ns: String,
    /// Namespace of regenerated base model modules.
    pub base_ns: String,
    pub query_ns: String,
    pub controller_ns: String,
    /// Emit a query-builder module per model.
    pub generate_query: bool,
    /// Format used when `init` writes table files.
    pub schema_format: FileFormat,
}

impl Default for RelforgeConfig {
    fn default() -> Self {
        Self {
            schema_dir: PathBuf::from("schema"),
            src_dir: PathBuf::from("src"),
            tables: Vec::new(),
            schemas: vec![String::new()],
            relations: InverseRelationSettings::All,
            model_ns: "crate::models".to_string(),
            base_ns: "crate::models::base".to_string(),
            query_ns: "crate::models::query".to_string(),
            controller_ns: "crate::controllers".to_string(),
            generate_query: true,
            schema_format: FileFormat::Json,
        }
    }
}

impl RelforgeConfig {
    /// Reject malformed namespaces and empty table patterns.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_namespace("modelNs", &self.model_ns)?;
        validate_namespace("baseNs", &self.base_ns)?;
        validate_namespace("queryNs", &self.query_ns)?;
        validate_namespace("controllerNs", &self.controller_ns)?;
        if let Some(index) = self.tables.iter().position(|t| t.trim().is_empty()) {
            return Err(ConfigError::EmptyTablePattern(index));
        }
        Ok(())
    }

    pub fn schema_dir(&self) -> &Path {
        &self.schema_dir
    }

    pub fn src_dir(&self) -> &Path {
        &self.src_dir
    }

    /// Schemas to scan, with duplicates removed. An empty list means the
    /// default schema.
    pub fn schemas(&self) -> Vec<String> {
        let mut schemas: Vec<String> = Vec::new();
        for schema in &self.schemas {
            let schema = schema.trim().to_string();
            if !schemas.contains(&schema) {
                schemas.push(schema);
            }
        }
        if schemas.is_empty() {
            schemas.push(String::new());
        }
        schemas
    }

    pub fn relations(&self) -> InverseRelationSettings {
        self.relations
    }

    pub fn table_selector(&self) -> TableSelector {
        TableSelector::new(self.tables.iter().map(|t| t.trim()))
    }

    pub fn model_ns(&self) -> &str {
        normalize_namespace(&self.model_ns)
    }

    pub fn base_ns(&self) -> &str {
        normalize_namespace(&self.base_ns)
    }

    pub fn query_ns(&self) -> &str {
        normalize_namespace(&self.query_ns)
    }

    pub fn controller_ns(&self) -> &str {
        normalize_namespace(&self.controller_ns)
    }

    pub fn generate_query(&self) -> bool {
        self.generate_query
    }

    pub fn schema_format(&self) -> FileFormat {
        self.schema_format
    }
}
