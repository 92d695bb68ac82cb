use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Strip surrounding whitespace and `:` from a namespace.
pub fn normalize_namespace(namespace: &str) -> &str {
    namespace.trim_matches(|c: char| c == ':' || c.is_whitespace())
}

/// Check that `namespace` is a `::`-separated path of Rust identifiers.
///
/// `field` names the configuration key in the error.
pub fn validate_namespace(field: &'static str, namespace: &str) -> Result<(), ConfigError> {
    let normalized = normalize_namespace(namespace);
    if normalized.is_empty() {
        return Err(ConfigError::EmptyNamespace { field });
    }
    for segment in normalized.split("::") {
        if !is_identifier(segment) {
            return Err(ConfigError::InvalidNamespaceSegment {
                field,
                namespace: normalized.to_string(),
                segment: segment.to_string(),
            });
        }
    }
    Ok(())
}

/// Directory holding the modules of `namespace`, relative to `src_dir`.
///
/// A leading `crate` segment maps to `src_dir` itself.
///
/// ```
/// use std::path::{Path, PathBuf};
/// use relforge_config::namespace_path;
///
/// assert_eq!(
///     namespace_path("crate::models::base", Path::new("src")),
///     PathBuf::from("src/models/base")
/// );
/// ```
pub fn namespace_path(namespace: &str, src_dir: &Path) -> PathBuf {
    let mut path = src_dir.to_path_buf();
    let mut segments = normalize_namespace(namespace)
        .split("::")
        .filter(|s| !s.is_empty())
        .peekable();
    if segments.peek() == Some(&"crate") {
        segments.next();
    }
    path.extend(segments);
    path
}

fn is_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    segment != "_" && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
