use relforge_core::{Relations, TableDef};
use relforge_naming::{relation_base_name, to_snake_case};

/// Pick a relation name for `table` that collides with neither its existing
/// relations nor its columns.
///
/// The base name is `candidate` inflected by `to_many`. On collision the
/// foreign-key column is appended (`posts_editor_id`), then the first free
/// numeric index (`posts_1`, `posts_2`, ...).
pub fn relation_name(
    existing: Option<&Relations>,
    table: &TableDef,
    candidate: &str,
    fk_column: Option<&str>,
    to_many: bool,
) -> String {
    let mut base = relation_base_name(candidate, to_many);
    if base.is_empty() {
        base = if to_many { "related".into() } else { "relation".into() };
    }
    let taken = |name: &str| existing.is_some_and(|r| r.contains_key(name)) || table.has_column(name);

    if !taken(&base) {
        return base;
    }
    if let Some(column) = fk_column {
        let suffixed = format!("{base}_{}", to_snake_case(column));
        if !taken(&suffixed) {
            return suffixed;
        }
    }
    let mut index = 1;
    loop {
        let numbered = format!("{base}_{index}");
        if !taken(&numbered) {
            return numbered;
        }
        index += 1;
    }
}
