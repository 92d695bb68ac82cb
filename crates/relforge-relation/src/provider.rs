use std::collections::HashMap;
use std::rc::Rc;

use indexmap::IndexMap;
use relforge_core::{TableDef, TableName};

use crate::error::ProviderError;

/// Source of table schemas: a live database, a snapshot on disk, or memory.
pub trait SchemaProvider {
    /// Schema of `name`, or `None` when no such table exists.
    fn table_schema(&self, name: &str) -> Result<Option<TableDef>, ProviderError>;

    /// Identifiers of every table in `schema` (`""` is the default schema).
    fn table_names(&self, schema: &str) -> Result<Vec<TableName>, ProviderError>;
}

/// Provider over a fixed set of tables, kept in insertion order.
#[derive(Debug, Clone, Default)]
pub struct InMemorySchemaProvider {
    tables: IndexMap<TableName, TableDef>,
}

impl InMemorySchemaProvider {
    pub fn new(tables: impl IntoIterator<Item = TableDef>) -> Self {
        Self {
            tables: tables.into_iter().map(|t| (t.name.clone(), t)).collect(),
        }
    }

    pub fn tables(&self) -> impl Iterator<Item = &TableDef> {
        self.tables.values()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl SchemaProvider for InMemorySchemaProvider {
    fn table_schema(&self, name: &str) -> Result<Option<TableDef>, ProviderError> {
        Ok(self.tables.get(name).cloned())
    }

    fn table_names(&self, schema: &str) -> Result<Vec<TableName>, ProviderError> {
        Ok(self
            .tables
            .values()
            .filter(|t| t.schema_name() == schema)
            .map(|t| t.name.clone())
            .collect())
    }
}

/// Per-run memo of provider lookups, including misses.
///
/// Each table identifier reaches the provider at most once.
pub struct SchemaCache<'p, P: SchemaProvider + ?Sized> {
    provider: &'p P,
    tables: HashMap<TableName, Option<Rc<TableDef>>>,
}

impl<'p, P: SchemaProvider + ?Sized> SchemaCache<'p, P> {
    pub fn new(provider: &'p P) -> Self {
        Self {
            provider,
            tables: HashMap::new(),
        }
    }

    pub fn get(&mut self, name: &str) -> Result<Option<Rc<TableDef>>, ProviderError> {
        if let Some(cached) = self.tables.get(name) {
            return Ok(cached.clone());
        }
        let fetched = self.provider.table_schema(name)?.map(Rc::new);
        self.tables.insert(name.to_string(), fetched.clone());
        Ok(fetched)
    }

    pub fn table_names(&self, schema: &str) -> Result<Vec<TableName>, ProviderError> {
        self.provider.table_names(schema)
    }
}
