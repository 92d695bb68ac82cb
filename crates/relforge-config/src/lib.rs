pub mod config;
pub mod error;
pub mod file_format;
pub mod namespace;
pub mod selector;

pub use config::RelforgeConfig;
pub use error::ConfigError;
pub use file_format::FileFormat;
pub use namespace::{namespace_path, normalize_namespace, validate_namespace};
pub use selector::TableSelector;
