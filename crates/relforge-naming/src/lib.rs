//! Naming conventions and helpers for relforge code generation.
//!
//! This crate turns table and column identifiers into relation names and entity
//! identifiers. It has no dependencies and can be used by any other relforge crate.

// ============================================================================
// Identifier parts
// ============================================================================

/// Return the last segment of a possibly schema-qualified table identifier.
///
/// # Examples
/// ```
/// use relforge_naming::short_table_name;
///
/// assert_eq!(short_table_name("public.user"), "user");
/// assert_eq!(short_table_name("user"), "user");
/// ```
pub fn short_table_name(name: &str) -> &str {
    match name.rfind('.') {
        Some(idx) => &name[idx + 1..],
        None => name,
    }
}

/// Return the schema qualifier of a table identifier, or `""` when unqualified.
///
/// # Examples
/// ```
/// use relforge_naming::schema_of;
///
/// assert_eq!(schema_of("public.user"), "public");
/// assert_eq!(schema_of("user"), "");
/// ```
pub fn schema_of(name: &str) -> &str {
    match name.rfind('.') {
        Some(idx) => &name[..idx],
        None => "",
    }
}

/// Strip a conventional identifier affix (`_id` suffix or `id_` prefix) from a
/// snake_case column name. A bare `id` is returned unchanged.
///
/// # Examples
/// ```
/// use relforge_naming::strip_id_affix;
///
/// assert_eq!(strip_id_affix("author_id"), "author");
/// assert_eq!(strip_id_affix("id_owner"), "owner");
/// assert_eq!(strip_id_affix("id"), "id");
/// assert_eq!(strip_id_affix("parent"), "parent");
/// ```
pub fn strip_id_affix(name: &str) -> &str {
    match (name.strip_suffix("_id"), name.strip_prefix("id_")) {
        (Some(stem), _) if !stem.is_empty() => stem,
        (_, Some(stem)) if !stem.is_empty() => stem,
        _ => name,
    }
}

// ============================================================================
// Case conversion
// ============================================================================

/// Convert camelCase, PascalCase or kebab-case to snake_case.
///
/// Acronym runs stay together (`HTTPLog` becomes `http_log`).
///
/// # Examples
/// ```
/// use relforge_naming::to_snake_case;
///
/// assert_eq!(to_snake_case("BlogPost"), "blog_post");
/// assert_eq!(to_snake_case("authorId"), "author_id");
/// assert_eq!(to_snake_case("user_id"), "user_id");
/// ```
pub fn to_snake_case(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len() + 4);
    for (idx, &ch) in chars.iter().enumerate() {
        if ch == '-' || ch == ' ' {
            if !out.is_empty() && !out.ends_with('_') {
                out.push('_');
            }
            continue;
        }
        if !ch.is_ascii_uppercase() {
            out.push(ch);
            continue;
        }
        let prev = idx.checked_sub(1).map(|p| chars[p]);
        let next = chars.get(idx + 1).copied();
        let boundary = prev.is_some_and(|p| {
            p.is_ascii_lowercase()
                || p.is_ascii_digit()
                || (p.is_ascii_uppercase() && next.is_some_and(|n| n.is_ascii_lowercase()))
        });
        if boundary && !out.ends_with('_') {
            out.push('_');
        }
        out.push(ch.to_ascii_lowercase());
    }
    out
}

/// Convert snake_case to PascalCase.
///
/// # Examples
/// ```
/// use relforge_naming::to_pascal_case;
///
/// assert_eq!(to_pascal_case("hello_world"), "HelloWorld");
/// assert_eq!(to_pascal_case("post_tag"), "PostTag");
/// assert_eq!(to_pascal_case("user"), "User");
/// ```
pub fn to_pascal_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut capitalize = true;
    for c in s.chars() {
        if c == '_' || c == '-' {
            capitalize = true;
            continue;
        }
        if capitalize {
            result.push(c.to_ascii_uppercase());
        } else {
            result.push(c);
        }
        capitalize = false;
    }
    result
}

// ============================================================================
// Inflection
// ============================================================================

/// Simple pluralization for relation names.
///
/// # Examples
/// ```
/// use relforge_naming::pluralize;
///
/// assert_eq!(pluralize("category"), "categories");
/// assert_eq!(pluralize("tag"), "tags");
/// assert_eq!(pluralize("box"), "boxes");
/// assert_eq!(pluralize("status"), "status");
/// ```
pub fn pluralize(name: &str) -> String {
    if name.is_empty() || name.ends_with('s') {
        return name.to_string();
    }
    if ["x", "z", "ch", "sh"].iter().any(|s| name.ends_with(s)) {
        return format!("{name}es");
    }
    if name.ends_with('y') && !["ay", "ey", "oy", "uy"].iter().any(|s| name.ends_with(s)) {
        return format!("{}ies", &name[..name.len() - 1]);
    }
    format!("{name}s")
}

/// Nouns whose singular and plural forms are the same.
const INVARIANT_NOUNS: &[&str] = &["series", "species", "news"];

/// Simple singularization, the inverse of [`pluralize`] for regular nouns.
///
/// # Examples
/// ```
/// use relforge_naming::singularize;
///
/// assert_eq!(singularize("categories"), "category");
/// assert_eq!(singularize("posts"), "post");
/// assert_eq!(singularize("addresses"), "address");
/// assert_eq!(singularize("status"), "status");
/// ```
pub fn singularize(name: &str) -> String {
    if INVARIANT_NOUNS.contains(&name) {
        return name.to_string();
    }
    match name.strip_suffix("ies") {
        Some(stem) if !stem.is_empty() => return format!("{stem}y"),
        _ => {}
    }
    for suffix in ["sses", "uses", "xes", "zes", "ches", "shes"] {
        if let Some(stem) = name.strip_suffix(suffix) {
            return format!("{stem}{}", &suffix[..suffix.len() - 2]);
        }
    }
    if ["ss", "us", "is"].iter().any(|s| name.ends_with(s)) {
        return name.to_string();
    }
    match name.strip_suffix('s') {
        Some(stem) if !stem.is_empty() => stem.to_string(),
        _ => name.to_string(),
    }
}

// ============================================================================
// Generated identifiers
// ============================================================================

/// Entity (type) name for a table: PascalCase of its short name.
///
/// # Examples
/// ```
/// use relforge_naming::entity_name;
///
/// assert_eq!(entity_name("public.blog_post"), "BlogPost");
/// assert_eq!(entity_name("user"), "User");
/// ```
pub fn entity_name(table: &str) -> String {
    to_pascal_case(&to_snake_case(short_table_name(table)))
}

/// Module (file stem) name for a table: snake_case of its short name.
pub fn module_name(table: &str) -> String {
    to_snake_case(short_table_name(table))
}

/// Base relation name derived from a table or column identifier.
///
/// The candidate is reduced to its short name, snake-cased, stripped of its
/// identifier affix and inflected to plural when `to_many`, singular otherwise.
/// A key column (one that carried the affix) names a single row already, so
/// its stem is kept as written in the singular case.
///
/// # Examples
/// ```
/// use relforge_naming::relation_base_name;
///
/// assert_eq!(relation_base_name("author_id", false), "author");
/// assert_eq!(relation_base_name("post", true), "posts");
/// assert_eq!(relation_base_name("tag_id", true), "tags");
/// assert_eq!(relation_base_name("public.Categories", false), "category");
/// assert_eq!(relation_base_name("alias_id", false), "alias");
/// ```
pub fn relation_base_name(candidate: &str, to_many: bool) -> String {
    let snake = to_snake_case(short_table_name(candidate));
    let stem = strip_id_affix(&snake);
    if to_many {
        pluralize(stem)
    } else if stem != snake {
        stem.to_string()
    } else {
        singularize(stem)
    }
}
