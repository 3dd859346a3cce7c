//! Bicho Capiba application layer.
//!
//! Use cases and the wizard orchestrator, wired to the ports of `bc-core`.

mod app;
pub mod deps;
pub mod usecases;

pub use app::{App, AppSettings};
pub use deps::AppDeps;
