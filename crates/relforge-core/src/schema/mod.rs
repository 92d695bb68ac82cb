pub mod column;
pub mod constraint;
pub mod foreign_key;
pub mod names;
pub mod reference;
pub mod table;

pub use column::{ColumnDef, ColumnType, ComplexColumnType, SimpleColumnType};
pub use constraint::TableConstraint;
pub use foreign_key::ForeignKeyDef;
pub use names::{ColumnName, TableName};
pub use reference::ReferenceAction;
pub use table::TableDef;
