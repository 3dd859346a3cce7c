use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{AdoptionId, AnimalId, OngId, UserId};

/// Progress of an adoption request, in the order an ONG walks through it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdoptionStage {
    Requested,
    Interview,
    Visit,
    Approved,
    Completed,
    Rejected,
    Withdrawn,
}

impl AdoptionStage {
    pub fn is_closed(self) -> bool {
        matches!(
            self,
            AdoptionStage::Completed | AdoptionStage::Rejected | AdoptionStage::Withdrawn
        )
    }

    pub fn label(self) -> &'static str {
        match self {
            AdoptionStage::Requested => "Solicitado",
            AdoptionStage::Interview => "Entrevista",
            AdoptionStage::Visit => "Visita",
            AdoptionStage::Approved => "Aprovado",
            AdoptionStage::Completed => "Concluído",
            AdoptionStage::Rejected => "Recusado",
            AdoptionStage::Withdrawn => "Cancelado",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdoptionProcess {
    pub id: AdoptionId,
    pub animal_id: AnimalId,
    pub animal_name: String,
    #[serde(default)]
    pub animal_photo_url: Option<String>,
    pub ong_id: OngId,
    pub ong_name: String,
    pub adopter_id: UserId,
    pub adopter_name: String,
    pub stage: AdoptionStage,
    pub updated_at: DateTime<Utc>,
}
