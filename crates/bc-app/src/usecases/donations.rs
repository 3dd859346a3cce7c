use std::sync::Arc;

use chrono::NaiveDate;

use bc_core::error::ApiError;
use bc_core::models::DonationCampaign;
use bc_core::ports::DonationCatalogPort;

/// Donation campaigns from the static catalog.
pub struct Donations {
    catalog: Arc<dyn DonationCatalogPort>,
}

impl Donations {
    pub fn new(catalog: Arc<dyn DonationCatalogPort>) -> Self {
        Self { catalog }
    }

    pub async fn list(&self) -> Result<Vec<DonationCampaign>, ApiError> {
        self.catalog.campaigns().await
    }

    /// Campaigns still open on `today`, least funded first.
    pub async fn open_on(&self, today: NaiveDate) -> Result<Vec<DonationCampaign>, ApiError> {
        let mut campaigns: Vec<_> = self
            .list()
            .await?
            .into_iter()
            .filter(|campaign| campaign.is_open_on(today) && !campaign.is_funded())
            .collect();
        campaigns.sort_by(|a, b| a.progress().total_cmp(&b.progress()));
        Ok(campaigns)
    }
}
