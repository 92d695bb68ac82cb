use serde::{Deserialize, Serialize};

use crate::schema::{
    column::ColumnDef, constraint::TableConstraint, foreign_key::ForeignKeyDef, names::TableName,
};

/// Introspected schema of a single table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "snake_case")]
pub struct TableDef {
    /// Fully-qualified identifier (`schema.table`, or just `table`).
    pub name: TableName,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub columns: Vec<ColumnDef>,
    #[serde(default)]
    pub constraints: Vec<TableConstraint>,
}

impl TableDef {
    pub fn new(name: impl Into<TableName>) -> Self {
        Self {
            name: name.into(),
            description: None,
            columns: Vec::new(),
            constraints: Vec::new(),
        }
    }

    /// Schema qualifier of the identifier, `""` when unqualified.
    pub fn schema_name(&self) -> &str {
        relforge_naming::schema_of(&self.name)
    }

    /// Last segment of the identifier.
    pub fn short_name(&self) -> &str {
        relforge_naming::short_table_name(&self.name)
    }

    pub fn column(&self, name: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// Primary key columns.
    ///
    /// A table-level `primary_key` constraint wins; otherwise the columns flagged
    /// inline are returned in column order.
    pub fn primary_key(&self) -> Vec<&str> {
        let declared = self.constraints.iter().find_map(|c| match c {
            TableConstraint::PrimaryKey { columns } => Some(columns),
            _ => None,
        });
        match declared {
            Some(columns) => columns.iter().map(String::as_str).collect(),
            None => self
                .columns
                .iter()
                .filter(|c| c.primary_key)
                .map(|c| c.name.as_str())
                .collect(),
        }
    }

    /// Foreign-key constraints in declared order.
    pub fn foreign_keys(&self) -> impl Iterator<Item = &ForeignKeyDef> {
        self.constraints.iter().filter_map(|c| match c {
            TableConstraint::ForeignKey(fk) => Some(fk),
            _ => None,
        })
    }
}
