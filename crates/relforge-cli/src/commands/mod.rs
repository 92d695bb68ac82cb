pub mod crud;
pub mod init;
pub mod model;
pub mod relations;
pub mod schema;

pub use crud::cmd_crud;
pub use init::cmd_init;
pub use model::cmd_model;
pub use relations::cmd_relations;
pub use schema::cmd_schema;
