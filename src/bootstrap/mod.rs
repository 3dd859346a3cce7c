pub mod config;
pub mod run;
pub mod tracing;
pub mod wiring;

pub use config::{load_config, load_from_source, resolve_config_source, ConfigSource};
pub use run::run_command;
pub use wiring::{build_app, wire_dependencies};
