//! Inferred relations between tables.
//!
//! A [`RelationMap`] is produced by one inference run and only read afterwards.
//! Descriptors carry everything an emitter needs to write a relation
//! declaration (target entity, cardinality, link columns, optional junction)
//! without re-inspecting the schema.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::schema::{ColumnName, TableName};

/// Ordered column correspondence: own column -> target column.
pub type LinkColumns = IndexMap<ColumnName, ColumnName>;

/// Relation name -> descriptor, in declaration order.
pub type Relations = IndexMap<String, RelationDescriptor>;

/// Table -> its relations, in the order tables first received a relation.
pub type RelationMap = IndexMap<TableName, Relations>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cardinality {
    One,
    Many,
}

impl Cardinality {
    pub fn is_many(self) -> bool {
        matches!(self, Cardinality::Many)
    }
}

/// Many-to-many hop through a junction table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViaJunction {
    pub table: TableName,
    /// Own column -> junction column.
    pub own_link: LinkColumns,
    /// Junction column -> target column.
    pub other_link: LinkColumns,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationDescriptor {
    pub target_table: TableName,
    /// Namespace-prefixed entity reference, e.g. `crate::models::User`.
    pub target_entity: String,
    pub cardinality: Cardinality,
    /// Own column -> target column. For junction relations this is the
    /// junction column -> target column mapping, equal to `via.other_link`.
    pub link: LinkColumns,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub via: Option<ViaJunction>,
    /// Name of the back-reference relation on the target table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inverse_of: Option<String>,
}

impl RelationDescriptor {
    /// Whether `other`, declared on this relation's target, walks the same
    /// columns back to `own_table`.
    pub fn is_inverse_of(&self, own_table: &str, other: &RelationDescriptor) -> bool {
        if other.target_table != own_table {
            return false;
        }
        match (&self.via, &other.via) {
            (None, None) => other.link == reverse_link(&self.link),
            (Some(mine), Some(theirs)) => {
                mine.table == theirs.table
                    && theirs.own_link == reverse_link(&mine.other_link)
                    && theirs.other_link == reverse_link(&mine.own_link)
            }
            _ => false,
        }
    }
}

/// Swap keys and values, keeping pair order.
pub fn reverse_link(link: &LinkColumns) -> LinkColumns {
    link.iter().map(|(k, v)| (v.clone(), k.clone())).collect()
}

/// Whether back-references are generated and annotated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "snake_case")]
pub enum InverseRelationSettings {
    /// Infer nothing.
    None,
    /// Infer foreign-key and junction relations.
    #[default]
    All,
    /// As `All`, then make sure every relation has a linked back-reference.
    AllInverse,
}
