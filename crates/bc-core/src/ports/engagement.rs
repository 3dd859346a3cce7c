use async_trait::async_trait;

use crate::error::ApiError;
use crate::ids::AnimalId;
use crate::models::{AdoptionProcess, AnimalSummary, DonationCampaign};

#[async_trait]
pub trait FavoritePort: Send + Sync {
    async fn list(&self) -> Result<Vec<AnimalSummary>, ApiError>;

    async fn add(&self, animal: &AnimalId) -> Result<(), ApiError>;

    async fn remove(&self, animal: &AnimalId) -> Result<(), ApiError>;
}

#[async_trait]
pub trait AdoptionPort: Send + Sync {
    /// Processes visible to the current account: its requests for adopters,
    /// requests received for shelters.
    async fn list(&self) -> Result<Vec<AdoptionProcess>, ApiError>;
}

#[async_trait]
pub trait DonationCatalogPort: Send + Sync {
    async fn campaigns(&self) -> Result<Vec<DonationCampaign>, ApiError>;
}
