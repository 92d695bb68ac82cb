use indexmap::IndexSet;
use relforge_core::{
    Cardinality, ForeignKeyDef, InverseRelationSettings, LinkColumns, RelationDescriptor,
    RelationMap, TableDef, TableName, ViaJunction, reverse_link,
};
use relforge_naming::{entity_name, short_table_name, strip_id_affix, to_snake_case};
use tracing::{debug, warn};

use crate::error::InferenceError;
use crate::inverse::link_inverse_relations;
use crate::junction::{JunctionClass, classify};
use crate::namer::relation_name;
use crate::provider::{SchemaCache, SchemaProvider};

/// Tables whose foreign keys are scanned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    /// Every table in each schema (`""` is the default schema).
    Schemas(Vec<String>),
    /// An explicit list of table identifiers.
    Tables(Vec<TableName>),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InferenceOptions {
    pub relations: InverseRelationSettings,
    /// Prefix for entity references, e.g. `crate::models`.
    pub namespace: String,
}

/// `{namespace}::{Entity}` reference for `table`.
pub fn entity_reference(namespace: &str, table: &str) -> String {
    if namespace.is_empty() {
        entity_name(table)
    } else {
        format!("{}::{}", namespace, entity_name(table))
    }
}

/// One inference run: owns the relation map while it is being built.
pub struct RelationInference<'p, P: SchemaProvider + ?Sized> {
    cache: SchemaCache<'p, P>,
    options: InferenceOptions,
    relations: RelationMap,
}

impl<'p, P: SchemaProvider + ?Sized> RelationInference<'p, P> {
    pub fn new(provider: &'p P, options: InferenceOptions) -> Self {
        Self {
            cache: SchemaCache::new(provider),
            options,
            relations: RelationMap::new(),
        }
    }

    pub fn run(mut self, scope: &Scope) -> Result<RelationMap, InferenceError> {
        if self.options.relations == InverseRelationSettings::None {
            return Ok(self.relations);
        }

        for name in self.scope_tables(scope)? {
            let Some(table) = self.cache.get(&name)? else {
                warn!(table = %name, "table in scope not found, skipping");
                continue;
            };
            match self.resolve_junction(&table)? {
                Some((first, second)) => self.add_junction_relations(&table, first, second)?,
                None => {
                    for fk in table.foreign_keys() {
                        self.add_foreign_key_relations(&table, fk)?;
                    }
                }
            }
        }

        if self.options.relations == InverseRelationSettings::AllInverse {
            link_inverse_relations(&mut self.relations, &mut self.cache, &self.options.namespace)?;
        }

        Ok(self.relations)
    }

    fn scope_tables(&self, scope: &Scope) -> Result<IndexSet<TableName>, InferenceError> {
        let mut tables = IndexSet::new();
        match scope {
            Scope::Schemas(schemas) => {
                let schemas: IndexSet<&String> = schemas.iter().collect();
                for schema in schemas {
                    tables.extend(self.cache.table_names(schema)?);
                }
            }
            Scope::Tables(names) => tables.extend(names.iter().cloned()),
        }
        Ok(tables)
    }

    /// The two keys of a junction table, provided both ends resolve.
    fn resolve_junction<'t>(
        &mut self,
        table: &'t TableDef,
    ) -> Result<Option<(&'t ForeignKeyDef, &'t ForeignKeyDef)>, InferenceError> {
        let JunctionClass::Junction { first, second } = classify(table) else {
            return Ok(None);
        };
        for fk in [first, second] {
            if self.cache.get(&fk.ref_table)?.is_none() {
                debug!(
                    table = %table.name,
                    ref_table = %fk.ref_table,
                    "junction side missing, treating as ordinary table"
                );
                return Ok(None);
            }
        }
        Ok(Some((first, second)))
    }

    fn add_foreign_key_relations(
        &mut self,
        table: &TableDef,
        fk: &ForeignKeyDef,
    ) -> Result<(), InferenceError> {
        let Some(first_column) = fk.first_column().filter(|_| fk.is_well_formed()) else {
            warn!(table = %table.name, ref_table = %fk.ref_table, "malformed foreign key, skipping");
            return Ok(());
        };
        let Some(target) = self.cache.get(&fk.ref_table)? else {
            warn!(
                table = %table.name,
                ref_table = %fk.ref_table,
                "foreign key references a missing table, skipping"
            );
            return Ok(());
        };

        let link: LinkColumns = fk
            .pairs()
            .map(|(local, remote)| (local.to_string(), remote.to_string()))
            .collect();

        let candidate = belongs_to_candidate(first_column, &target.name);
        let name = relation_name(
            self.relations.get(&table.name),
            table,
            &candidate,
            Some(first_column),
            false,
        );
        let belongs_to = self.descriptor(&target.name, Cardinality::One, link.clone(), None);
        self.insert(&table.name, name, belongs_to);

        let cardinality = reverse_cardinality(table, fk);
        let name = relation_name(
            self.relations.get(&target.name),
            &target,
            &table.name,
            Some(first_column),
            cardinality.is_many(),
        );
        let back = self.descriptor(&table.name, cardinality, reverse_link(&link), None);
        self.insert(&target.name, name, back);
        Ok(())
    }

    fn add_junction_relations(
        &mut self,
        junction: &TableDef,
        first: &ForeignKeyDef,
        second: &ForeignKeyDef,
    ) -> Result<(), InferenceError> {
        for (own, other) in [(first, second), (second, first)] {
            let (Some(owner), Some(target)) =
                (self.cache.get(&own.ref_table)?, self.cache.get(&other.ref_table)?)
            else {
                continue;
            };
            let via = ViaJunction {
                table: junction.name.clone(),
                own_link: own
                    .pairs()
                    .map(|(local, remote)| (remote.to_string(), local.to_string()))
                    .collect(),
                other_link: other
                    .pairs()
                    .map(|(local, remote)| (local.to_string(), remote.to_string()))
                    .collect(),
            };
            let candidate = other.first_column().unwrap_or(&target.name);
            let name = relation_name(
                self.relations.get(&owner.name),
                &owner,
                candidate,
                other.first_column(),
                true,
            );
            let descriptor = self.descriptor(
                &target.name,
                Cardinality::Many,
                via.other_link.clone(),
                Some(via),
            );
            self.insert(&owner.name, name, descriptor);
        }
        Ok(())
    }

    fn descriptor(
        &self,
        target: &str,
        cardinality: Cardinality,
        link: LinkColumns,
        via: Option<ViaJunction>,
    ) -> RelationDescriptor {
        RelationDescriptor {
            target_table: target.to_string(),
            target_entity: entity_reference(&self.options.namespace, target),
            cardinality,
            link,
            via,
            inverse_of: None,
        }
    }

    fn insert(&mut self, table: &str, name: String, descriptor: RelationDescriptor) {
        debug!(
            table,
            relation = %name,
            target = %descriptor.target_table,
            cardinality = ?descriptor.cardinality,
            via = descriptor.via.as_ref().map(|v| v.table.as_str()),
            "relation inferred"
        );
        self.relations
            .entry(table.to_string())
            .or_default()
            .insert(name, descriptor);
    }
}

/// Run inference over `scope` with a fresh cache.
pub fn infer_relations<P: SchemaProvider + ?Sized>(
    provider: &P,
    scope: &Scope,
    options: &InferenceOptions,
) -> Result<RelationMap, InferenceError> {
    RelationInference::new(provider, options.clone()).run(scope)
}

/// Naming candidate for the belongs-to side: the first key column, or the
/// referenced table when the column is a bare `id`.
pub(crate) fn belongs_to_candidate(column: &str, target_table: &str) -> String {
    let snake = to_snake_case(column);
    if strip_id_affix(&snake) == "id" {
        short_table_name(target_table).to_string()
    } else {
        column.to_string()
    }
}

/// ONE only when `fk` alone is the table's single-column primary key.
pub(crate) fn reverse_cardinality(table: &TableDef, fk: &ForeignKeyDef) -> Cardinality {
    let pk = table.primary_key();
    let [key] = pk.as_slice() else {
        return Cardinality::Many;
    };
    if fk.columns.iter().any(|c| c != key) {
        return Cardinality::Many;
    }
    let sharing = table
        .foreign_keys()
        .filter(|other| other.columns.iter().any(|c| c == key))
        .count();
    if sharing == 1 {
        Cardinality::One
    } else {
        Cardinality::Many
    }
}
