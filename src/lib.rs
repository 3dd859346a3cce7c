//! Bicho Capiba
//!
//! Cliente do marketplace de adoção de animais: bootstrap e linha de comando
//! sobre os crates `bc-core`, `bc-app` e `bc-infra`.

pub mod bootstrap;
pub mod cli;

pub use bc_app::App;
pub use bc_core::config::AppConfig;
