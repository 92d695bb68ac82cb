pub mod relation;
pub mod schema;

pub use relation::{
    Cardinality, InverseRelationSettings, LinkColumns, RelationDescriptor, RelationMap, Relations,
    ViaJunction, reverse_link,
};
pub use schema::{
    ColumnDef, ColumnName, ColumnType, ComplexColumnType, ForeignKeyDef, ReferenceAction,
    SimpleColumnType, TableConstraint, TableDef, TableName,
};
