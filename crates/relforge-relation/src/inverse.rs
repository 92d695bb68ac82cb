use relforge_core::{
    Cardinality, ForeignKeyDef, RelationDescriptor, RelationMap, TableDef, TableName, ViaJunction,
    reverse_link,
};
use tracing::debug;

use crate::error::InferenceError;
use crate::infer::{belongs_to_candidate, entity_reference, reverse_cardinality};
use crate::namer::relation_name;
use crate::provider::{SchemaCache, SchemaProvider};

/// Give every relation in `relations` a back-reference on its target and
/// record the pairing on both ends through `inverse_of`.
///
/// An existing relation on the target walking the same columns back is reused;
/// otherwise one is synthesized there. Running this twice changes nothing.
pub fn link_inverse_relations<P: SchemaProvider + ?Sized>(
    relations: &mut RelationMap,
    cache: &mut SchemaCache<'_, P>,
    namespace: &str,
) -> Result<(), InferenceError> {
    let keys: Vec<(TableName, String)> = relations
        .iter()
        .flat_map(|(table, rels)| rels.keys().map(move |name| (table.clone(), name.clone())))
        .collect();

    for (table, name) in keys {
        let Some(relation) = relations.get(&table).and_then(|r| r.get(&name)).cloned() else {
            continue;
        };
        let inverse = match find_inverse(relations, &table, &name, &relation) {
            Some(found) => found,
            None => match synthesize(relations, cache, namespace, &table, &name, &relation)? {
                Some(created) => created,
                None => continue,
            },
        };
        set_inverse(relations, &table, &name, &inverse);
        set_inverse(relations, &relation.target_table, &inverse, &name);
    }
    Ok(())
}

fn find_inverse(
    relations: &RelationMap,
    table: &str,
    name: &str,
    relation: &RelationDescriptor,
) -> Option<String> {
    relations
        .get(&relation.target_table)?
        .iter()
        .filter(|(other_name, _)| !(relation.target_table == table && other_name.as_str() == name))
        .filter(|(_, other)| other.inverse_of.as_deref().is_none_or(|n| n == name))
        .find(|(_, other)| relation.is_inverse_of(table, other))
        .map(|(other_name, _)| other_name.clone())
}

fn synthesize<P: SchemaProvider + ?Sized>(
    relations: &mut RelationMap,
    cache: &mut SchemaCache<'_, P>,
    namespace: &str,
    table: &str,
    name: &str,
    relation: &RelationDescriptor,
) -> Result<Option<String>, InferenceError> {
    let Some(target) = cache.get(&relation.target_table)? else {
        debug!(
            table,
            relation = name,
            target = %relation.target_table,
            "target table not found, no back-reference added"
        );
        return Ok(None);
    };

    let (cardinality, link, via, candidate, fk_column) = match &relation.via {
        Some(via) => {
            let mirrored = ViaJunction {
                table: via.table.clone(),
                own_link: reverse_link(&via.other_link),
                other_link: reverse_link(&via.own_link),
            };
            let column = mirrored.other_link.keys().next().cloned();
            let candidate = column.clone().unwrap_or_else(|| table.to_string());
            (
                Cardinality::Many,
                mirrored.other_link.clone(),
                Some(mirrored),
                candidate,
                column,
            )
        }
        None => {
            let link = reverse_link(&relation.link);
            let held_key = match cache.get(table)? {
                Some(owner) => {
                    owning_key(&owner, relation).map(|fk| reverse_cardinality(&owner, fk))
                }
                // Without the owner's schema a ONE is taken for a belongs-to.
                None => (!relation.cardinality.is_many()).then_some(Cardinality::Many),
            };
            match held_key {
                Some(cardinality) => {
                    let column = link.values().next().cloned();
                    (cardinality, link, None, table.to_string(), column)
                }
                // The target holds the key columns.
                None => {
                    let column = link.keys().next().cloned();
                    let candidate = column
                        .as_deref()
                        .map(|c| belongs_to_candidate(c, table))
                        .unwrap_or_else(|| table.to_string());
                    (Cardinality::One, link, None, candidate, column)
                }
            }
        }
    };

    let inverse_name = relation_name(
        relations.get(&target.name),
        &target,
        &candidate,
        fk_column.as_deref(),
        cardinality.is_many(),
    );
    debug!(
        table = %target.name,
        relation = %inverse_name,
        inverse_of = name,
        "back-reference added"
    );
    relations.entry(target.name.clone()).or_default().insert(
        inverse_name.clone(),
        RelationDescriptor {
            target_table: table.to_string(),
            target_entity: entity_reference(namespace, table),
            cardinality,
            link,
            via,
            inverse_of: Some(name.to_string()),
        },
    );
    Ok(Some(inverse_name))
}

/// The foreign key on `owner` behind a direct relation, if `owner` holds it.
fn owning_key<'t>(
    owner: &'t TableDef,
    relation: &RelationDescriptor,
) -> Option<&'t ForeignKeyDef> {
    owner.foreign_keys().find(|fk| {
        fk.ref_table == relation.target_table && fk.columns.iter().eq(relation.link.keys())
    })
}

fn set_inverse(relations: &mut RelationMap, table: &str, name: &str, inverse: &str) {
    if let Some(descriptor) = relations.get_mut(table).and_then(|r| r.get_mut(name)) {
        descriptor.inverse_of = Some(inverse.to_string());
    }
}
