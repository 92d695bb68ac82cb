/// Table identifier, optionally schema-qualified (`schema.table`).
pub type TableName = String;
pub type ColumnName = String;
