use serde::{Deserialize, Serialize};

use crate::schema::names::ColumnName;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "snake_case")]
pub struct ColumnDef {
    pub name: ColumnName,
    pub r#type: ColumnType,
    #[serde(default)]
    pub nullable: bool,
    /// Inline primary-key flag; ignored when the table declares a primary key constraint.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub primary_key: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl ColumnDef {
    pub fn new(name: impl Into<ColumnName>, r#type: ColumnType) -> Self {
        Self {
            name: name.into(),
            r#type,
            nullable: false,
            primary_key: false,
            default: None,
            comment: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "snake_case", untagged)]
pub enum ColumnType {
    Simple(SimpleColumnType),
    Complex(ComplexColumnType),
}

impl ColumnType {
    /// Convert column type to Rust type string (for entity generation)
    pub fn to_rust_type(&self, nullable: bool) -> String {
        let base = match self {
            ColumnType::Simple(ty) => match ty {
                SimpleColumnType::SmallInt => "i16",
                SimpleColumnType::Integer => "i32",
                SimpleColumnType::BigInt => "i64",
                SimpleColumnType::Real => "f32",
                SimpleColumnType::DoublePrecision => "f64",
                SimpleColumnType::Text => "String",
                SimpleColumnType::Boolean => "bool",
                SimpleColumnType::Date => "Date",
                SimpleColumnType::Time => "Time",
                SimpleColumnType::Timestamp => "DateTime",
                SimpleColumnType::Timestamptz => "DateTimeWithTimeZone",
                SimpleColumnType::Bytea => "Vec<u8>",
                SimpleColumnType::Uuid => "Uuid",
                SimpleColumnType::Json => "Json",
            },
            ColumnType::Complex(ty) => match ty {
                ComplexColumnType::Numeric { .. } => "Decimal",
                ComplexColumnType::Varchar { .. }
                | ComplexColumnType::Char { .. }
                | ComplexColumnType::Custom { .. } => "String",
            },
        };

        if nullable {
            format!("Option<{}>", base)
        } else {
            base.to_string()
        }
    }
}

impl From<SimpleColumnType> for ColumnType {
    fn from(ty: SimpleColumnType) -> Self {
        ColumnType::Simple(ty)
    }
}

impl From<ComplexColumnType> for ColumnType {
    fn from(ty: ComplexColumnType) -> Self {
        ColumnType::Complex(ty)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "snake_case")]
pub enum SimpleColumnType {
    SmallInt,
    Integer,
    BigInt,
    Real,
    DoublePrecision,
    Text,
    Boolean,
    Date,
    Time,
    Timestamp,
    Timestamptz,
    Bytea,
    Uuid,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum ComplexColumnType {
    Varchar { length: u32 },
    Numeric { precision: u32, scale: u32 },
    Char { length: u32 },
    Custom { custom_type: String },
}
