//! Dependency grouping for [`App`](crate::App) construction.
//!
//! Plain parameter struct: every port is required, nothing is defaulted.

use std::sync::Arc;

use bc_core::ports::*;

pub struct AppDeps {
    pub auth: Arc<dyn AuthPort>,
    pub animals: Arc<dyn AnimalPort>,
    pub profiles: Arc<dyn ProfilePort>,
    pub lookup: Arc<dyn LookupPort>,
    pub favorites: Arc<dyn FavoritePort>,
    pub adoptions: Arc<dyn AdoptionPort>,
    pub donations: Arc<dyn DonationCatalogPort>,
}
