pub mod config;
pub mod tables;

pub use config::{CONFIG_FILE, load_config, load_config_from_path, load_config_or_default};
pub use tables::{load_provider, load_tables, load_tables_from_dir};
