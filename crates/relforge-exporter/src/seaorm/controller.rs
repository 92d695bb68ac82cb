use relforge_core::TableDef;
use relforge_naming::module_name;

use crate::error::ExportError;
use crate::files::ExportContext;
use crate::seaorm::{checked_primary_key, field_ident, primary_key_type};

/// Render a CRUD controller scaffold for `table` with `index`, `create`,
/// `update` and `delete` handlers over the user model.
pub fn render_controller(table: &TableDef, ctx: &ExportContext) -> Result<String, ExportError> {
    let primary_key = checked_primary_key(table)?;
    let key_type = primary_key_type(table, &primary_key);
    let module = field_ident(&module_name(&table.name));

    let mut lines: Vec<String> = Vec::new();
    lines.push(format!("//! CRUD handlers for table `{}`.", table.name));
    lines.push("//!".into());
    lines.push("//! Scaffolded by relforge. Edit freely: existing files are kept unless forced.".into());
    lines.push(String::new());
    lines.push("use sea_orm::{ActiveModelTrait, ConnectionTrait, DbErr, EntityTrait};".into());
    lines.push(String::new());
    lines.push(format!(
        "use {}::{}::{{ActiveModel, Entity, Model}};",
        ctx.model_ns, module
    ));
    lines.push(String::new());
    lines.push(format!("pub type Key = {key_type};"));
    lines.push(String::new());
    lines.push("pub async fn index<C: ConnectionTrait>(db: &C) -> Result<Vec<Model>, DbErr> {".into());
    lines.push("    Entity::find().all(db).await".into());
    lines.push("}".into());
    lines.push(String::new());
    lines.push(
        "pub async fn create<C: ConnectionTrait>(db: &C, data: ActiveModel) -> Result<Model, DbErr> {"
            .into(),
    );
    lines.push("    data.insert(db).await".into());
    lines.push("}".into());
    lines.push(String::new());
    lines.push(
        "pub async fn update<C: ConnectionTrait>(db: &C, data: ActiveModel) -> Result<Model, DbErr> {"
            .into(),
    );
    lines.push("    data.update(db).await".into());
    lines.push("}".into());
    lines.push(String::new());
    lines.push("pub async fn delete<C: ConnectionTrait>(db: &C, key: Key) -> Result<u64, DbErr> {".into());
    lines.push("    let result = Entity::delete_by_id(key).exec(db).await?;".into());
    lines.push("    Ok(result.rows_affected)".into());
    lines.push("}".into());
    lines.push(String::new());

    Ok(lines.join("\n"))
}
