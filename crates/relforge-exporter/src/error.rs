use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExportError {
    #[error("table '{0}' has no columns")]
    NoColumns(String),
    #[error("table '{0}' has no primary key")]
    MissingPrimaryKey(String),
    #[error("primary key of table '{table}' names unknown column '{column}'")]
    UnknownKeyColumn { table: String, column: String },
}
