//! SeaORM renderers.
//!
//! Base models follow the dense entity format:
//! <https://www.sea-ql.org/SeaORM/docs/generate-entity/entity-format/>

pub mod controller;
pub mod model;
pub mod query;

use std::collections::BTreeSet;

use relforge_core::{
    Cardinality, ColumnDef, ColumnType, ForeignKeyDef, ReferenceAction, RelationDescriptor,
    Relations, SimpleColumnType, TableDef,
};
use relforge_naming::{module_name, to_pascal_case};
use relforge_relation::junction_key_relations;

use crate::error::ExportError;
use crate::files::ExportContext;

pub use controller::render_controller;
pub use model::render_user_model;
pub use query::render_query;

/// Render the always-regenerated base model of `table`, with one field per
/// inferred relation.
pub fn render_base_model(
    table: &TableDef,
    relations: Option<&Relations>,
    ctx: &ExportContext,
) -> Result<String, ExportError> {
    let primary_key = checked_primary_key(table)?;
    let composite_pk = primary_key.len() > 1;

    let mut lines: Vec<String> = Vec::new();
    lines.push(format!("//! Base model for table `{}`.", table.name));
    lines.push("//!".into());
    lines.push("//! Generated by relforge and overwritten on every run. Custom code belongs".into());
    lines.push(format!(
        "//! in `{}::{}`.",
        ctx.model_ns,
        module_name(&table.name)
    ));
    lines.push(String::new());
    lines.push("use sea_orm::entity::prelude::*;".into());
    lines.push(String::new());
    if let Some(description) = &table.description {
        push_doc(&mut lines, "", description);
    }
    lines.push("#[sea_orm::model]".into());
    if table.columns.iter().any(|c| is_float(&c.r#type)) {
        lines.push("#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]".into());
    } else {
        lines.push("#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]".into());
    }
    lines.push(table_attr(table));
    lines.push("pub struct Model {".into());

    for column in &table.columns {
        render_column(&mut lines, column, &primary_key, composite_pk);
    }
    let fields = relation_fields(table, relations, ctx);
    for (name, relation) in &fields {
        render_relation(&mut lines, table, &fields, name, relation);
    }

    lines.push("}".into());
    lines.push(String::new());

    Ok(lines.join("\n"))
}

/// Render the base namespace's `mod.rs`: one module per table plus an entity
/// alias matching the references written into relation fields.
pub fn render_base_index<'a>(modules: impl IntoIterator<Item = &'a str>) -> String {
    let modules: BTreeSet<&str> = modules.into_iter().collect();

    let mut lines: Vec<String> = Vec::new();
    lines.push("//! Generated by relforge and overwritten on every run.".into());
    lines.push(String::new());
    for module in &modules {
        lines.push(format!("pub mod {};", field_ident(module)));
    }
    if !modules.is_empty() {
        lines.push(String::new());
    }
    for module in &modules {
        lines.push(format!(
            "pub use {}::Entity as {};",
            field_ident(module),
            to_pascal_case(module)
        ));
    }
    if !modules.is_empty() {
        lines.push(String::new());
    }
    lines.join("\n")
}

/// Inferred relations plus, for a junction table, the belongs-to side of
/// each key that `via` relations elsewhere resolve through.
fn relation_fields(
    table: &TableDef,
    relations: Option<&Relations>,
    ctx: &ExportContext,
) -> Relations {
    let mut fields = relations.cloned().unwrap_or_default();
    for (name, relation) in junction_key_relations(table, &ctx.base_ns) {
        let present = fields.values().any(|r| {
            r.via.is_none() && r.target_table == relation.target_table && r.link == relation.link
        });
        if !present && !fields.contains_key(&name) {
            fields.insert(name, relation);
        }
    }
    fields
}

fn table_attr(table: &TableDef) -> String {
    let schema = table.schema_name();
    if schema.is_empty() {
        format!("#[sea_orm(table_name = \"{}\")]", table.short_name())
    } else {
        format!(
            "#[sea_orm(schema_name = \"{}\", table_name = \"{}\")]",
            schema,
            table.short_name()
        )
    }
}

fn render_column(
    lines: &mut Vec<String>,
    column: &ColumnDef,
    primary_key: &[&str],
    composite_pk: bool,
) {
    if let Some(comment) = &column.comment {
        push_doc(lines, "    ", comment);
    }

    let mut attrs: Vec<String> = Vec::new();
    if primary_key.contains(&column.name.as_str()) {
        attrs.push("primary_key".into());
        if composite_pk || !is_integer(&column.r#type) {
            attrs.push("auto_increment = false".into());
        }
    }
    let field = sanitize_field_name(&column.name);
    if field != column.name {
        attrs.push(format!("column_name = \"{}\"", column.name));
    }
    if !attrs.is_empty() {
        lines.push(format!("    #[sea_orm({})]", attrs.join(", ")));
    }

    let ty = column.r#type.to_rust_type(column.nullable);
    lines.push(format!("    pub {}: {},", field_ident(&field), ty));
}

fn render_relation(
    lines: &mut Vec<String>,
    table: &TableDef,
    relations: &Relations,
    name: &str,
    relation: &RelationDescriptor,
) {
    let self_ref = relation.target_table == table.name;
    let ambiguous = self_ref
        || relations
            .values()
            .filter(|r| r.target_table == relation.target_table)
            .count()
            > 1;

    let mut attrs: Vec<String> = Vec::new();
    match (&relation.via, relation.cardinality) {
        (Some(via), _) => {
            attrs.push("has_many".into());
            attrs.push(format!("via = \"{}\"", module_name(&via.table)));
        }
        (None, Cardinality::One) if owning_key(table, relation).is_some() => {
            attrs.push(if self_ref { "self_ref" } else { "belongs_to" }.into());
            if ambiguous {
                attrs.push(format!("relation_enum = \"{}\"", to_pascal_case(name)));
            }
            attrs.push(format!(
                "from = \"{}\"",
                attr_columns(relation.link.keys())
            ));
            attrs.push(format!("to = \"{}\"", attr_columns(relation.link.values())));
            if let Some(fk) = owning_key(table, relation) {
                if let Some(action) = fk.on_update {
                    attrs.push(format!("on_update = \"{}\"", action_variant(action)));
                }
                if let Some(action) = fk.on_delete {
                    attrs.push(format!("on_delete = \"{}\"", action_variant(action)));
                }
            }
        }
        (None, cardinality) => {
            let kind = match cardinality {
                Cardinality::One => "has_one",
                Cardinality::Many => "has_many",
            };
            attrs.push(if self_ref { "self_ref" } else { kind }.into());
            if ambiguous {
                attrs.push(format!("relation_enum = \"{}\"", to_pascal_case(name)));
                if let Some(inverse) = &relation.inverse_of {
                    attrs.push(format!("via_rel = \"{}\"", to_pascal_case(inverse)));
                }
            }
        }
    }

    let wrapper = if relation.cardinality.is_many() {
        "HasMany"
    } else {
        "HasOne"
    };
    lines.push(format!("    #[sea_orm({})]", attrs.join(", ")));
    lines.push(format!(
        "    pub {}: {}<{}>,",
        field_ident(&sanitize_field_name(name)),
        wrapper,
        relation.target_entity
    ));
}

/// The foreign key `table` declares behind a direct relation, if any.
fn owning_key<'t>(
    table: &'t TableDef,
    relation: &RelationDescriptor,
) -> Option<&'t ForeignKeyDef> {
    table.foreign_keys().find(|fk| {
        fk.ref_table == relation.target_table && fk.columns.iter().eq(relation.link.keys())
    })
}

fn action_variant(action: ReferenceAction) -> &'static str {
    match action {
        ReferenceAction::Cascade => "Cascade",
        ReferenceAction::Restrict => "Restrict",
        ReferenceAction::SetNull => "SetNull",
        ReferenceAction::SetDefault => "SetDefault",
        ReferenceAction::NoAction => "NoAction",
    }
}

/// Primary key columns, all of which must exist on the table.
pub(crate) fn checked_primary_key(table: &TableDef) -> Result<Vec<&str>, ExportError> {
    if table.columns.is_empty() {
        return Err(ExportError::NoColumns(table.name.clone()));
    }
    let primary_key = table.primary_key();
    if primary_key.is_empty() {
        return Err(ExportError::MissingPrimaryKey(table.name.clone()));
    }
    if let Some(missing) = primary_key.iter().find(|c| !table.has_column(c)) {
        return Err(ExportError::UnknownKeyColumn {
            table: table.name.clone(),
            column: missing.to_string(),
        });
    }
    Ok(primary_key)
}

/// `Column` enum variant SeaORM derives for a column.
pub(crate) fn column_variant(column: &str) -> String {
    to_pascal_case(&sanitize_field_name(column))
}

/// Rust type of the primary key: the column type, or a tuple when composite.
pub(crate) fn primary_key_type(table: &TableDef, primary_key: &[&str]) -> String {
    let types: Vec<String> = primary_key
        .iter()
        .filter_map(|c| table.column(c))
        .map(|c| c.r#type.to_rust_type(false))
        .collect();
    match types.as_slice() {
        [single] => single.clone(),
        _ => format!("({})", types.join(", ")),
    }
}

fn attr_columns<'a>(cols: impl Iterator<Item = &'a String>) -> String {
    let cols: Vec<&str> = cols.map(String::as_str).collect();
    if cols.len() == 1 {
        cols[0].to_string()
    } else {
        format!("({})", cols.join(", "))
    }
}

fn push_doc(lines: &mut Vec<String>, indent: &str, text: &str) {
    for line in text.lines() {
        let line = line.trim_end();
        if line.is_empty() {
            lines.push(format!("{indent}///"));
        } else {
            lines.push(format!("{indent}/// {line}"));
        }
    }
}

fn is_integer(ty: &ColumnType) -> bool {
    matches!(
        ty,
        ColumnType::Simple(
            SimpleColumnType::SmallInt | SimpleColumnType::Integer | SimpleColumnType::BigInt
        )
    )
}

fn is_float(ty: &ColumnType) -> bool {
    matches!(
        ty,
        ColumnType::Simple(SimpleColumnType::Real | SimpleColumnType::DoublePrecision)
    )
}

pub(crate) fn sanitize_field_name(name: &str) -> String {
    let mut result = String::new();

    for (idx, ch) in name.chars().enumerate() {
        if (ch.is_ascii_alphanumeric() && (idx > 0 || ch.is_ascii_alphabetic())) || ch == '_' {
            result.push(ch);
        } else if idx == 0 && ch.is_ascii_digit() {
            result.push('_');
            result.push(ch);
        } else {
            result.push('_');
        }
    }

    if result.is_empty() {
        "_col".into()
    } else {
        result
    }
}

const KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do",
    "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl", "in",
    "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "static", "struct", "trait", "true", "try", "type", "typeof", "unsafe", "unsized",
    "use", "virtual", "where", "while", "yield",
];

/// Identifier for an already sanitized name, raw when it is a keyword.
pub(crate) fn field_ident(name: &str) -> String {
    match name {
        "self" | "Self" | "super" | "crate" => format!("{name}_"),
        _ if KEYWORDS.contains(&name) => format!("r#{name}"),
        _ => name.to_string(),
    }
}


#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use indexmap::IndexMap;
    use insta::assert_snapshot;
    use relforge_core::{ComplexColumnType, LinkColumns, TableConstraint, ViaJunction};

    pub(crate) fn ctx() -> ExportContext {
        ExportContext::from(&relforge_config::RelforgeConfig::default())
    }

    pub(crate) fn column(name: &str, ty: impl Into<ColumnType>, nullable: bool) -> ColumnDef {
        ColumnDef {
            nullable,
            ..ColumnDef::new(name, ty.into())
        }
    }

    pub(crate) fn post() -> TableDef {
        TableDef {
            description: Some("A blog post.".into()),
            columns: vec![
                column("id", SimpleColumnType::Integer, false),
                column("author_id", SimpleColumnType::Integer, false),
                ColumnDef {
                    comment: Some("Shown in listings.".into()),
                    ..column("title", ComplexColumnType::Varchar { length: 200 }, false)
                },
                column("type", SimpleColumnType::Text, true),
            ],
            constraints: vec![
                TableConstraint::PrimaryKey {
                    columns: vec!["id".into()],
                },
                TableConstraint::ForeignKey(ForeignKeyDef::new(["author_id"], "user", ["id"])),
            ],
            ..TableDef::new("post")
        }
    }

    fn link(pairs: &[(&str, &str)]) -> LinkColumns {
        pairs
            .iter()
            .map(|(a, b)| (a.to_string(), b.to_string()))
            .collect()
    }

    pub(crate) fn post_relations() -> Relations {
        let mut relations = IndexMap::new();
        relations.insert(
            "author".to_string(),
            RelationDescriptor {
                target_table: "user".into(),
                target_entity: "crate::models::base::User".into(),
                cardinality: Cardinality::One,
                link: link(&[("author_id", "id")]),
                via: None,
                inverse_of: Some("posts".into()),
            },
        );
        relations.insert(
            "tags".to_string(),
            RelationDescriptor {
                target_table: "tag".into(),
                target_entity: "crate::models::base::Tag".into(),
                cardinality: Cardinality::Many,
                link: link(&[("tag_id", "id")]),
                via: Some(ViaJunction {
                    table: "post_tag".into(),
                    own_link: link(&[("id", "post_id")]),
                    other_link: link(&[("tag_id", "id")]),
                }),
                inverse_of: Some("posts".into()),
            },
        );
        relations
    }

    #[test]
    fn render_post_with_relations() {
        let rendered = render_base_model(&post(), Some(&post_relations()), &ctx()).unwrap();
        assert_snapshot!(rendered, @r#"
        //! Base model for table `post`.
        //!
        //! Generated by relforge and overwritten on every run. Custom code belongs
        //! in `crate::models::post`.

        use sea_orm::entity::prelude::*;

        /// A blog post.
        #[sea_orm::model]
        #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
        #[sea_orm(table_name = "post")]
        pub struct Model {
            #[sea_orm(primary_key)]
            pub id: i32,
            pub author_id: i32,
            /// Shown in listings.
            pub title: String,
            pub r#type: Option<String>,
            #[sea_orm(belongs_to, from = "author_id", to = "id")]
            pub author: HasOne<crate::models::base::User>,
            #[sea_orm(has_many, via = "post_tag")]
            pub tags: HasMany<crate::models::base::Tag>,
        }
        "#);
    }

    #[test]
    fn render_self_reference_with_relation_enums() {
        let category = TableDef {
            columns: vec![
                column("id", SimpleColumnType::BigInt, false),
                column("parent_id", SimpleColumnType::BigInt, true),
            ],
            constraints: vec![
                TableConstraint::PrimaryKey {
                    columns: vec!["id".into()],
                },
                TableConstraint::ForeignKey(ForeignKeyDef::new(
                    ["parent_id"],
                    "shop.category",
                    ["id"],
                )),
            ],
            ..TableDef::new("shop.category")
        };
        let mut relations = IndexMap::new();
        relations.insert(
            "parent".to_string(),
            RelationDescriptor {
                target_table: "shop.category".into(),
                target_entity: "Category".into(),
                cardinality: Cardinality::One,
                link: link(&[("parent_id", "id")]),
                via: None,
                inverse_of: Some("categories".into()),
            },
        );
        relations.insert(
            "categories".to_string(),
            RelationDescriptor {
                target_table: "shop.category".into(),
                target_entity: "Category".into(),
                cardinality: Cardinality::Many,
                link: link(&[("id", "parent_id")]),
                via: None,
                inverse_of: Some("parent".into()),
            },
        );

        let rendered = render_base_model(&category, Some(&relations), &ctx()).unwrap();
        assert!(rendered.contains(r#"#[sea_orm(schema_name = "shop", table_name = "category")]"#));
        assert!(rendered.contains(
            r#"#[sea_orm(self_ref, relation_enum = "Parent", from = "parent_id", to = "id")]"#
        ));
        assert!(rendered.contains(
            r#"#[sea_orm(self_ref, relation_enum = "Categories", via_rel = "Parent")]"#
        ));
        assert!(rendered.contains("pub parent_id: Option<i64>,"));
    }

    #[test]
    fn composite_key_and_float_columns() {
        let line = TableDef {
            columns: vec![
                column("order_id", SimpleColumnType::Integer, false),
                column("line-no", SimpleColumnType::SmallInt, false),
                column("weight", SimpleColumnType::DoublePrecision, false),
            ],
            constraints: vec![TableConstraint::PrimaryKey {
                columns: vec!["order_id".into(), "line-no".into()],
            }],
            ..TableDef::new("order_line")
        };
        let rendered = render_base_model(&line, None, &ctx()).unwrap();
        assert!(rendered.contains("#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]"));
        assert!(rendered.contains(
            "    #[sea_orm(primary_key, auto_increment = false)]\n    pub order_id: i32,"
        ));
        assert!(rendered.contains(
            r#"#[sea_orm(primary_key, auto_increment = false, column_name = "line-no")]"#
        ));
        assert!(rendered.contains("pub line_no: i16,"));
    }

    fn post_tag() -> TableDef {
        TableDef {
            columns: vec![
                column("post_id", SimpleColumnType::Integer, false),
                column("tag_id", SimpleColumnType::Integer, false),
            ],
            constraints: vec![
                TableConstraint::PrimaryKey {
                    columns: vec!["post_id".into(), "tag_id".into()],
                },
                TableConstraint::ForeignKey(ForeignKeyDef::new(["post_id"], "post", ["id"])),
                TableConstraint::ForeignKey(ForeignKeyDef::new(["tag_id"], "tag", ["id"])),
            ],
            ..TableDef::new("post_tag")
        }
    }

    #[test]
    fn junction_model_belongs_to_both_sides() {
        let rendered = render_base_model(&post_tag(), None, &ctx()).unwrap();
        assert_snapshot!(rendered, @r#"
        //! Base model for table `post_tag`.
        //!
        //! Generated by relforge and overwritten on every run. Custom code belongs
        //! in `crate::models::post_tag`.

        use sea_orm::entity::prelude::*;

        #[sea_orm::model]
        #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
        #[sea_orm(table_name = "post_tag")]
        pub struct Model {
            #[sea_orm(primary_key, auto_increment = false)]
            pub post_id: i32,
            #[sea_orm(primary_key, auto_increment = false)]
            pub tag_id: i32,
            #[sea_orm(belongs_to, from = "post_id", to = "id")]
            pub post: HasOne<crate::models::base::Post>,
            #[sea_orm(belongs_to, from = "tag_id", to = "id")]
            pub tag: HasOne<crate::models::base::Tag>,
        }
        "#);
    }

    #[test]
    fn junction_keys_already_inferred_are_not_repeated() {
        let mut relations = IndexMap::new();
        relations.insert(
            "post".to_string(),
            RelationDescriptor {
                target_table: "post".into(),
                target_entity: "crate::models::base::Post".into(),
                cardinality: Cardinality::One,
                link: link(&[("post_id", "id")]),
                via: None,
                inverse_of: None,
            },
        );
        let rendered = render_base_model(&post_tag(), Some(&relations), &ctx()).unwrap();
        assert_eq!(rendered.matches("pub post: HasOne").count(), 1);
        assert!(rendered.contains("pub tag: HasOne<crate::models::base::Tag>,"));
    }

    #[test]
    fn has_one_when_target_holds_key() {
        let user = TableDef {
            columns: vec![column("id", SimpleColumnType::Uuid, false)],
            constraints: vec![TableConstraint::PrimaryKey {
                columns: vec!["id".into()],
            }],
            ..TableDef::new("user")
        };
        let mut relations = IndexMap::new();
        relations.insert(
            "profile".to_string(),
            RelationDescriptor {
                target_table: "profile".into(),
                target_entity: "Profile".into(),
                cardinality: Cardinality::One,
                link: link(&[("id", "user_id")]),
                via: None,
                inverse_of: None,
            },
        );
        let rendered = render_base_model(&user, Some(&relations), &ctx()).unwrap();
        assert!(rendered.contains("#[sea_orm(primary_key, auto_increment = false)]"));
        assert!(rendered.contains("    #[sea_orm(has_one)]\n    pub profile: HasOne<Profile>,"));
    }

    #[test]
    fn two_relations_to_one_target_get_enums() {
        let mut relations = post_relations();
        relations.insert(
            "editor".to_string(),
            RelationDescriptor {
                target_table: "user".into(),
                target_entity: "crate::models::base::User".into(),
                cardinality: Cardinality::One,
                link: link(&[("editor_id", "id")]),
                via: None,
                inverse_of: None,
            },
        );
        let mut table = post();
        table.columns.push(column("editor_id", SimpleColumnType::Integer, true));
        table
            .constraints
            .push(TableConstraint::ForeignKey(ForeignKeyDef::new(["editor_id"], "user", ["id"])));

        let rendered = render_base_model(&table, Some(&relations), &ctx()).unwrap();
        assert!(rendered.contains(
            r#"#[sea_orm(belongs_to, relation_enum = "Author", from = "author_id", to = "id")]"#
        ));
        assert!(rendered.contains(
            r#"#[sea_orm(belongs_to, relation_enum = "Editor", from = "editor_id", to = "id")]"#
        ));
    }

    #[test]
    fn belongs_to_carries_referential_actions() {
        let mut table = post();
        table.constraints[1] = TableConstraint::ForeignKey(ForeignKeyDef {
            on_delete: Some(ReferenceAction::Cascade),
            on_update: Some(ReferenceAction::NoAction),
            ..ForeignKeyDef::new(["author_id"], "user", ["id"])
        });
        let rendered = render_base_model(&table, Some(&post_relations()), &ctx()).unwrap();
        assert!(rendered.contains(
            r#"#[sea_orm(belongs_to, from = "author_id", to = "id", on_update = "NoAction", on_delete = "Cascade")]"#
        ));
    }

    #[test]
    fn missing_primary_key_is_an_error() {
        let table = TableDef {
            columns: vec![column("name", SimpleColumnType::Text, false)],
            ..TableDef::new("log")
        };
        assert_eq!(
            render_base_model(&table, None, &ctx()),
            Err(ExportError::MissingPrimaryKey("log".into()))
        );
        assert_eq!(
            render_base_model(&TableDef::new("empty"), None, &ctx()),
            Err(ExportError::NoColumns("empty".into()))
        );
    }

    #[test]
    fn primary_key_must_name_a_column() {
        let table = TableDef {
            columns: vec![column("id", SimpleColumnType::Integer, false)],
            constraints: vec![TableConstraint::PrimaryKey {
                columns: vec!["uid".into()],
            }],
            ..TableDef::new("user")
        };
        assert_eq!(
            render_base_model(&table, None, &ctx()),
            Err(ExportError::UnknownKeyColumn {
                table: "user".into(),
                column: "uid".into()
            })
        );
    }

    #[test]
    fn render_index_sorts_and_aliases() {
        let rendered = render_base_index(["user", "post_tag", "post", "user"]);
        assert_snapshot!(rendered, @r"
        //! Generated by relforge and overwritten on every run.

        pub mod post;
        pub mod post_tag;
        pub mod user;

        pub use post::Entity as Post;
        pub use post_tag::Entity as PostTag;
        pub use user::Entity as User;
        ");
    }
}
