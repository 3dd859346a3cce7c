//! Application use cases.
//!
//! Each use case owns the ports it needs as `Arc<dyn …>`; shared session
//! state travels as `Arc<SessionContext>`.

pub mod adoptions;
pub mod donations;
pub mod favorites;
pub mod feed;
pub mod lookup;
pub mod profiles;
pub mod session;
pub mod submission;
pub mod wizard;

#[cfg(test)]
pub(crate) mod mocks;

use bc_core::error::ApiError;
use bc_core::wizard::StepTableError;

pub use adoptions::AdoptionProcesses;
pub use donations::Donations;
pub use favorites::Favorites;
pub use feed::{AnimalFeed, FeedLoad, FeedSnapshot};
pub use lookup::{Debouncer, LookupAutofill, LookupOutcome};
pub use profiles::{OngPage, Profiles};
pub use session::{LoginError, SessionContext};
pub use wizard::{build_wizard, WizardOrchestrator};

/// Errors of use cases that both call the backend and build wizards.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("invalid step table: {0}")]
    StepTable(#[from] StepTableError),
}
