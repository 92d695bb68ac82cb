use serde::{Deserialize, Serialize};

use crate::schema::{names::ColumnName, names::TableName, reference::ReferenceAction};

/// A foreign-key constraint: ordered (local column, referenced column) pairs
/// pointing at `ref_table`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "snake_case")]
pub struct ForeignKeyDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub columns: Vec<ColumnName>,
    pub ref_table: TableName,
    pub ref_columns: Vec<ColumnName>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_delete: Option<ReferenceAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_update: Option<ReferenceAction>,
}

impl ForeignKeyDef {
    /// Shorthand for a constraint without a name or referential actions.
    pub fn new(
        columns: impl IntoIterator<Item = impl Into<ColumnName>>,
        ref_table: impl Into<TableName>,
        ref_columns: impl IntoIterator<Item = impl Into<ColumnName>>,
    ) -> Self {
        Self {
            name: None,
            columns: columns.into_iter().map(Into::into).collect(),
            ref_table: ref_table.into(),
            ref_columns: ref_columns.into_iter().map(Into::into).collect(),
            on_delete: None,
            on_update: None,
        }
    }

    /// At least one pair, and as many referenced columns as local ones.
    pub fn is_well_formed(&self) -> bool {
        !self.columns.is_empty() && self.columns.len() == self.ref_columns.len()
    }

    /// (local, referenced) column pairs in declared order.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.columns
            .iter()
            .zip(&self.ref_columns)
            .map(|(local, remote)| (local.as_str(), remote.as_str()))
    }

    /// The first local column, used as the naming candidate for this key.
    pub fn first_column(&self) -> Option<&str> {
        self.columns.first().map(String::as_str)
    }
}
