//! CLI command implementations.

pub mod build;
pub mod init;
pub mod switch;

pub use build::build_site;
pub use init::init_project;
pub use switch::{switch_language, SwitchOptions};
