use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::ids::{CampaignId, OngId};

/// Fundraising campaign run by an ONG. Amounts are in centavos.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DonationCampaign {
    pub id: CampaignId,
    pub ong_id: OngId,
    pub ong_name: String,
    pub title: String,
    pub description: String,
    pub goal_cents: u64,
    pub raised_cents: u64,
    #[serde(default)]
    pub pix_key: Option<String>,
    #[serde(default)]
    pub ends_on: Option<NaiveDate>,
}

impl DonationCampaign {
    /// Raised fraction of the goal, clamped to `0.0..=1.0`.
    pub fn progress(&self) -> f64 {
        if self.goal_cents == 0 {
            return 1.0;
        }
        (self.raised_cents as f64 / self.goal_cents as f64).min(1.0)
    }

    /// Whole percentage for progress bars.
    pub fn progress_percent(&self) -> u8 {
        (self.progress() * 100.0).floor() as u8
    }

    pub fn is_funded(&self) -> bool {
        self.raised_cents >= self.goal_cents
    }

    pub fn is_open_on(&self, day: NaiveDate) -> bool {
        self.ends_on.map_or(true, |end| day <= end)
    }
}
