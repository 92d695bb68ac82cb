use relforge_core::TableDef;
use relforge_naming::{entity_name, module_name};

use crate::error::ExportError;
use crate::files::ExportContext;
use crate::seaorm::{checked_primary_key, column_variant, field_ident, sanitize_field_name};

/// Render a chainable query builder for `table`, with a `by_*` filter for
/// every primary-key and foreign-key column.
pub fn render_query(table: &TableDef, ctx: &ExportContext) -> Result<String, ExportError> {
    let primary_key = checked_primary_key(table)?;
    let mut filtered: Vec<&str> = primary_key.clone();
    for fk in table.foreign_keys() {
        for column in &fk.columns {
            if !filtered.contains(&column.as_str()) && table.has_column(column) {
                filtered.push(column);
            }
        }
    }

    let name = format!("{}Query", entity_name(&table.name));
    let module = field_ident(&module_name(&table.name));

    let mut lines: Vec<String> = Vec::new();
    lines.push(format!("//! Query builder for table `{}`.", table.name));
    lines.push("//!".into());
    lines.push("//! Generated by relforge and overwritten on every run.".into());
    lines.push(String::new());
    lines.push("use sea_orm::sea_query::IntoCondition;".into());
    lines.push(
        "use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, Select};".into(),
    );
    lines.push(String::new());
    lines.push(format!(
        "use {}::{}::{{Column, Entity, Model}};",
        ctx.base_ns, module
    ));
    lines.push(String::new());
    lines.push(format!("/// Chainable filters over `{}`.", table.name));
    lines.push("#[derive(Debug, Clone)]".into());
    lines.push(format!("pub struct {name} {{"));
    lines.push("    select: Select<Entity>,".into());
    lines.push("}".into());
    lines.push(String::new());
    lines.push(format!("impl Default for {name} {{"));
    lines.push("    fn default() -> Self {".into());
    lines.push("        Self::new()".into());
    lines.push("    }".into());
    lines.push("}".into());
    lines.push(String::new());
    lines.push(format!("impl {name} {{"));
    lines.push("    pub fn new() -> Self {".into());
    lines.push("        Self {".into());
    lines.push("            select: Entity::find(),".into());
    lines.push("        }".into());
    lines.push("    }".into());

    for column in filtered {
        let Some(def) = table.column(column) else {
            continue;
        };
        let field = sanitize_field_name(column);
        lines.push(String::new());
        lines.push(format!(
            "    pub fn by_{}(self, {}: {}) -> Self {{",
            field,
            field_ident(&field),
            def.r#type.to_rust_type(false)
        ));
        lines.push(format!(
            "        self.filter(Column::{}.eq({}))",
            column_variant(column),
            field_ident(&field)
        ));
        lines.push("    }".into());
    }

    lines.push(String::new());
    lines.push("    pub fn filter(mut self, condition: impl IntoCondition) -> Self {".into());
    lines.push("        self.select = self.select.filter(condition);".into());
    lines.push("        self".into());
    lines.push("    }".into());
    lines.push(String::new());
    lines.push("    pub fn into_select(self) -> Select<Entity> {".into());
    lines.push("        self.select".into());
    lines.push("    }".into());
    lines.push(String::new());
    lines.push(
        "    pub async fn all<C: ConnectionTrait>(self, db: &C) -> Result<Vec<Model>, DbErr> {".into(),
    );
    lines.push("        self.select.all(db).await".into());
    lines.push("    }".into());
    lines.push(String::new());
    lines.push(
        "    pub async fn one<C: ConnectionTrait>(self, db: &C) -> Result<Option<Model>, DbErr> {"
            .into(),
    );
    lines.push("        self.select.one(db).await".into());
    lines.push("    }".into());
    lines.push("}".into());
    lines.push(String::new());

    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seaorm::tests::{ctx, post};
    use insta::assert_snapshot;

    #[test]
    fn render_query_for_post() {
        let rendered = render_query(&post(), &ctx()).unwrap();
        assert_snapshot!(rendered, @r"
        //! Query builder for table `post`.
        //!
        //! Generated by relforge and overwritten on every run.

        use sea_orm::sea_query::IntoCondition;
        use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, Select};

        use crate::models::base::post::{Column, Entity, Model};

        /// Chainable filters over `post`.
        #[derive(Debug, Clone)]
        pub struct PostQuery {
            select: Select<Entity>,
        }

        impl Default for PostQuery {
            fn default() -> Self {
                Self::new()
            }
        }

        impl PostQuery {
            pub fn new() -> Self {
                Self {
                    select: Entity::find(),
                }
            }

            pub fn by_id(self, id: i32) -> Self {
                self.filter(Column::Id.eq(id))
            }

            pub fn by_author_id(self, author_id: i32) -> Self {
                self.filter(Column::AuthorId.eq(author_id))
            }

            pub fn filter(mut self, condition: impl IntoCondition) -> Self {
                self.select = self.select.filter(condition);
                self
            }

            pub fn into_select(self) -> Select<Entity> {
                self.select
            }

            pub async fn all<C: ConnectionTrait>(self, db: &C) -> Result<Vec<Model>, DbErr> {
                self.select.all(db).await
            }

            pub async fn one<C: ConnectionTrait>(self, db: &C) -> Result<Option<Model>, DbErr> {
                self.select.one(db).await
            }
        }
        ");
    }

    #[test]
    fn query_requires_primary_key() {
        let table = TableDef::new("audit");
        assert!(render_query(&table, &ctx()).is_err());
    }
}
