//! Donation campaigns bundled with the app.
//!
//! The backend has no donations endpoint yet; campaigns are curated by hand
//! and shipped as static data.

use async_trait::async_trait;
use chrono::NaiveDate;

use bc_core::error::ApiError;
use bc_core::ids::{CampaignId, OngId};
use bc_core::models::DonationCampaign;
use bc_core::ports::DonationCatalogPort;

struct CampaignSeed {
    id: &'static str,
    ong_id: &'static str,
    ong_name: &'static str,
    title: &'static str,
    description: &'static str,
    goal_cents: u64,
    raised_cents: u64,
    pix_key: Option<&'static str>,
    ends_on: Option<(i32, u32, u32)>,
}

const CAMPAIGNS: &[CampaignSeed] = &[
    CampaignSeed {
        id: "racao-inverno",
        ong_id: "patas-unidas",
        ong_name: "Patas Unidas",
        title: "Ração para o inverno",
        description: "Compra de 300 kg de ração para os 80 cães do abrigo durante o inverno.",
        goal_cents: 450_000,
        raised_cents: 312_550,
        pix_key: Some("doacoes@patasunidas.org"),
        ends_on: Some((2026, 8, 31)),
    },
    CampaignSeed {
        id: "castracao-coletiva",
        ong_id: "miau-recife",
        ong_name: "Miau Recife",
        title: "Mutirão de castração",
        description: "Castração de 120 gatos de colônias urbanas com clínicas parceiras.",
        goal_cents: 1_200_000,
        raised_cents: 264_000,
        pix_key: Some("12.345.678/0001-95"),
        ends_on: Some((2026, 12, 15)),
    },
    CampaignSeed {
        id: "reforma-canil",
        ong_id: "patas-unidas",
        ong_name: "Patas Unidas",
        title: "Reforma do canil",
        description: "Troca do telhado e do piso das baias que alagam na época de chuva.",
        goal_cents: 2_500_000,
        raised_cents: 2_500_000,
        pix_key: Some("doacoes@patasunidas.org"),
        ends_on: None,
    },
    CampaignSeed {
        id: "resgate-emergencial",
        ong_id: "lar-temporario-olinda",
        ong_name: "Lar Temporário Olinda",
        title: "Fundo de resgate emergencial",
        description: "Reserva para cirurgias e internações de animais atropelados.",
        goal_cents: 800_000,
        raised_cents: 95_000,
        pix_key: None,
        ends_on: None,
    },
];

impl CampaignSeed {
    fn to_campaign(&self) -> DonationCampaign {
        DonationCampaign {
            id: CampaignId::from_str(self.id),
            ong_id: OngId::from_str(self.ong_id),
            ong_name: self.ong_name.to_string(),
            title: self.title.to_string(),
            description: self.description.to_string(),
            goal_cents: self.goal_cents,
            raised_cents: self.raised_cents,
            pix_key: self.pix_key.map(str::to_string),
            ends_on: self
                .ends_on
                .and_then(|(year, month, day)| NaiveDate::from_ymd_opt(year, month, day)),
        }
    }
}

/// [`DonationCatalogPort`] over the bundled campaign list.
pub struct StaticDonationCatalog {
    campaigns: Vec<DonationCampaign>,
}

impl StaticDonationCatalog {
    pub fn new() -> Self {
        Self::with_campaigns(CAMPAIGNS.iter().map(CampaignSeed::to_campaign).collect())
    }

    pub fn with_campaigns(campaigns: Vec<DonationCampaign>) -> Self {
        Self { campaigns }
    }
}

impl Default for StaticDonationCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DonationCatalogPort for StaticDonationCatalog {
    async fn campaigns(&self) -> Result<Vec<DonationCampaign>, ApiError> {
        Ok(self.campaigns.clone())
    }
}
