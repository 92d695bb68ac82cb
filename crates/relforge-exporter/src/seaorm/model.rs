use relforge_core::TableDef;
use relforge_naming::module_name;

use crate::files::ExportContext;
use crate::seaorm::field_ident;

/// Render the user-owned model of `table`: re-exports the base model and holds
/// the `ActiveModelBehavior` hook. Written once, never overwritten.
pub fn render_user_model(table: &TableDef, ctx: &ExportContext) -> String {
    let module = field_ident(&module_name(&table.name));
    let mut lines: Vec<String> = Vec::new();
    lines.push(format!("//! Model for table `{}`.", table.name));
    lines.push("//!".into());
    lines.push("//! Created once by relforge and never overwritten: custom code goes here.".into());
    lines.push(String::new());
    lines.push("use sea_orm::ActiveModelBehavior;".into());
    lines.push(String::new());
    lines.push(format!("pub use {}::{}::*;", ctx.base_ns, module));
    lines.push(String::new());
    lines.push("impl ActiveModelBehavior for ActiveModel {}".into());
    lines.push(String::new());
    lines.join("\n")
}
