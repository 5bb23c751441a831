//! CLI command handlers.

pub mod component;
pub mod config;
pub mod role;
pub mod schema;

pub use component::{run_component_create, run_component_update};
pub use config::run_config_show;
pub use role::{run_role_create, run_role_delete, run_roles_delete};
pub use schema::run_schema;
