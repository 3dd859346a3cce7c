//! Port interfaces for the application layer.
//!
//! Every port talks to the backend (or a static catalog) and reports failures
//! as [`ApiError`](crate::error::ApiError). Infrastructure implements them in
//! `bc-infra`; use cases in `bc-app` depend only on these traits.

mod animal;
mod auth;
mod engagement;
mod lookup;
mod profile;
mod submission;

pub use animal::AnimalPort;
pub use auth::AuthPort;
pub use engagement::{AdoptionPort, DonationCatalogPort, FavoritePort};
pub use lookup::LookupPort;
pub use profile::ProfilePort;
pub use submission::{SubmissionPort, SubmissionReceipt};
