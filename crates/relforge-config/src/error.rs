use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("namespace `{field}` is empty")]
    EmptyNamespace { field: &'static str },
    #[error("namespace `{field}` has invalid segment `{segment}` in `{namespace}`")]
    InvalidNamespaceSegment {
        field: &'static str,
        namespace: String,
        segment: String,
    },
    #[error("table pattern #{0} is empty")]
    EmptyTablePattern(usize),
}
