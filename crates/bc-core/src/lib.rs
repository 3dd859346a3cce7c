//! # bc-core
//!
//! Domain models, ports and the pure state machines of Bicho Capiba: form
//! drafts with cascading clears, field validators, the step gate and the
//! wizard controller.
//!
//! This crate performs no I/O.

pub mod config;
pub mod error;
pub mod flows;
pub mod form;
pub mod ids;
pub mod models;
pub mod ports;
pub mod wizard;

// Used by `form_fields!` expansions in other crates.
#[doc(hidden)]
pub use serde as __serde;

pub use config::AppConfig;
pub use error::{ApiError, ErrorMessages};
pub use form::{Draft, FieldValue, FileRef, FormField, ValidationErrors};
pub use ids::{AdoptionId, AnimalId, CampaignId, OngId, UserId};
pub use wizard::{StepDefinition, WizardEvent, WizardMachine, WizardSnapshot, WizardStatus};
