use std::collections::BTreeSet;

use relforge_core::{Cardinality, ForeignKeyDef, RelationDescriptor, Relations, TableDef};

use crate::infer::{belongs_to_candidate, entity_reference};
use crate::namer::relation_name;

/// Result of inspecting a table for the many-to-many junction shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JunctionClass<'a> {
    NotJunction,
    /// The two defining keys, in declared order.
    Junction {
        first: &'a ForeignKeyDef,
        second: &'a ForeignKeyDef,
    },
}

/// Classify `table` as a pure junction table or not.
///
/// A junction has exactly two well-formed foreign keys to two different
/// tables over disjoint columns, its primary key is exactly the union of their
/// columns, and it has no columns outside that key. Anything else, including a third foreign key
/// or a payload column, is `NotJunction`.
pub fn classify(table: &TableDef) -> JunctionClass<'_> {
    let fks: Vec<&ForeignKeyDef> = table.foreign_keys().collect();
    let [first, second] = fks.as_slice() else {
        return JunctionClass::NotJunction;
    };
    if !first.is_well_formed() || !second.is_well_formed() || first.ref_table == second.ref_table {
        return JunctionClass::NotJunction;
    }

    if first.columns.iter().any(|c| second.columns.contains(c)) {
        return JunctionClass::NotJunction;
    }

    let pk: BTreeSet<&str> = table.primary_key().into_iter().collect();
    let covered: BTreeSet<&str> = first
        .columns
        .iter()
        .chain(&second.columns)
        .map(String::as_str)
        .collect();
    if pk.is_empty() || pk != covered {
        return JunctionClass::NotJunction;
    }

    if table.columns.iter().any(|c| !pk.contains(c.name.as_str())) {
        return JunctionClass::NotJunction;
    }

    JunctionClass::Junction {
        first: *first,
        second: *second,
    }
}

/// Belongs-to relations of a junction table's two keys.
///
/// Inference keeps junction tables off the relation map; generated code still
/// needs these on the junction entity to resolve the many-to-many hop. Empty
/// for any other table.
pub fn junction_key_relations(table: &TableDef, namespace: &str) -> Relations {
    let mut relations = Relations::new();
    let JunctionClass::Junction { first, second } = classify(table) else {
        return relations;
    };
    for fk in [first, second] {
        let Some(column) = fk.first_column() else {
            continue;
        };
        let name = relation_name(
            Some(&relations),
            table,
            &belongs_to_candidate(column, &fk.ref_table),
            Some(column),
            false,
        );
        relations.insert(
            name,
            RelationDescriptor {
                target_table: fk.ref_table.clone(),
                target_entity: entity_reference(namespace, &fk.ref_table),
                cardinality: Cardinality::One,
                link: fk
                    .pairs()
                    .map(|(local, remote)| (local.to_string(), remote.to_string()))
                    .collect(),
                via: None,
                inverse_of: None,
            },
        );
    }
    relations
}

#[cfg(test)]
mod tests {
    use super::*;
    use relforge_core::{ColumnDef, SimpleColumnType, TableConstraint};
    use rstest::rstest;

    fn junction(extra_columns: &[&str], pk: &[&str], fks: &[(&str, &str)]) -> TableDef {
        let mut columns: Vec<ColumnDef> = fks
            .iter()
            .map(|(col, _)| ColumnDef::new(*col, SimpleColumnType::Integer.into()))
            .collect();
        columns.extend(
            extra_columns
                .iter()
                .map(|c| ColumnDef::new(*c, SimpleColumnType::Text.into())),
        );
        let mut constraints = vec![TableConstraint::PrimaryKey {
            columns: pk.iter().map(|c| c.to_string()).collect(),
        }];
        constraints.extend(fks.iter().map(|(col, target)| {
            TableConstraint::ForeignKey(ForeignKeyDef::new([*col], *target, ["id"]))
        }));
        TableDef {
            columns,
            constraints,
            ..TableDef::new("post_tag")
        }
    }

    #[test]
    fn pure_junction_is_detected() {
        let table = junction(&[], &["post_id", "tag_id"], &[("post_id", "post"), ("tag_id", "tag")]);
        match classify(&table) {
            JunctionClass::Junction { first, second } => {
                assert_eq!(first.ref_table, "post");
                assert_eq!(second.ref_table, "tag");
            }
            JunctionClass::NotJunction => panic!("expected junction"),
        }
    }

    #[test]
    fn primary_key_order_does_not_matter() {
        let table = junction(&[], &["tag_id", "post_id"], &[("post_id", "post"), ("tag_id", "tag")]);
        assert!(matches!(classify(&table), JunctionClass::Junction { .. }));
    }

    #[rstest]
    #[case::payload_column(&["created_at"], &["post_id", "tag_id"], &[("post_id", "post"), ("tag_id", "tag")])]
    #[case::surrogate_key(&["id"], &["id"], &[("post_id", "post"), ("tag_id", "tag")])]
    #[case::partial_key(&[], &["post_id"], &[("post_id", "post"), ("tag_id", "tag")])]
    #[case::same_target(&[], &["user_id", "friend_id"], &[("user_id", "user"), ("friend_id", "user")])]
    #[case::three_keys(&[], &["a_id", "b_id", "c_id"], &[("a_id", "a"), ("b_id", "b"), ("c_id", "c")])]
    #[case::overlapping_keys(&[], &["id"], &[("id", "user"), ("id", "person")])]
    #[case::single_key(&[], &["post_id"], &[("post_id", "post")])]
    fn ambiguous_tables_are_not_junctions(
        #[case] extra: &[&str],
        #[case] pk: &[&str],
        #[case] fks: &[(&str, &str)],
    ) {
        assert_eq!(classify(&junction(extra, pk, fks)), JunctionClass::NotJunction);
    }

    #[test]
    fn no_primary_key_is_not_junction() {
        let mut table = junction(&[], &[], &[("post_id", "post"), ("tag_id", "tag")]);
        table
            .constraints
            .retain(|c| !matches!(c, TableConstraint::PrimaryKey { .. }));
        assert_eq!(classify(&table), JunctionClass::NotJunction);
    }

    #[test]
    fn junction_keys_become_belongs_to() {
        let table = junction(&[], &["post_id", "tag_id"], &[("post_id", "post"), ("tag_id", "tag")]);
        let relations = junction_key_relations(&table, "crate::models::base");

        let names: Vec<&str> = relations.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["post", "tag"]);
        let tag = &relations["tag"];
        assert_eq!(tag.target_table, "tag");
        assert_eq!(tag.target_entity, "crate::models::base::Tag");
        assert_eq!(tag.cardinality, Cardinality::One);
        assert_eq!(tag.link.len(), 1);
        assert_eq!(tag.link["tag_id"], "id");
    }

    #[test]
    fn ordinary_table_has_no_junction_keys() {
        let table = junction(
            &["created_at"],
            &["post_id", "tag_id"],
            &[("post_id", "post"), ("tag_id", "tag")],
        );
        assert!(junction_key_relations(&table, "").is_empty());
    }

    #[test]
    fn composite_keys_on_both_sides() {
        let table = TableDef {
            columns: ["order_id", "order_tenant", "product_id"]
                .iter()
                .map(|c| ColumnDef::new(*c, SimpleColumnType::Integer.into()))
                .collect(),
            constraints: vec![
                TableConstraint::PrimaryKey {
                    columns: vec!["order_id".into(), "order_tenant".into(), "product_id".into()],
                },
                TableConstraint::ForeignKey(ForeignKeyDef::new(
                    ["order_id", "order_tenant"],
                    "order",
                    ["id", "tenant"],
                )),
                TableConstraint::ForeignKey(ForeignKeyDef::new(["product_id"], "product", ["id"])),
            ],
            ..TableDef::new("order_product")
        };
        assert!(matches!(classify(&table), JunctionClass::Junction { .. }));
    }
}
