//! Animal listings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{AnimalId, OngId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Species {
    Dog,
    Cat,
}

/// Shared by both species: mixed breed ("sem raça definida").
pub const MIXED_BREED: &str = "SRD";

const DOG_BREEDS: &[&str] = &[
    MIXED_BREED,
    "Beagle",
    "Border Collie",
    "Boxer",
    "Bulldog",
    "Dachshund",
    "Golden Retriever",
    "Labrador",
    "Pastor Alemão",
    "Pinscher",
    "Pit Bull",
    "Poodle",
    "Rottweiler",
    "Shih Tzu",
    "Vira-lata Caramelo",
    "Yorkshire",
];

const CAT_BREEDS: &[&str] = &[
    MIXED_BREED,
    "Angorá",
    "Bengal",
    "Maine Coon",
    "Persa",
    "Ragdoll",
    "Siamês",
    "Sphynx",
];

const DOG_VACCINES: &[&str] = &["V8", "V10", "Antirrábica", "Gripe Canina", "Giardíase"];
const CAT_VACCINES: &[&str] = &["V3", "V4", "V5", "Antirrábica", "FeLV"];

impl Species {
    pub const ALL: [Species; 2] = [Species::Dog, Species::Cat];

    pub fn as_str(self) -> &'static str {
        match self {
            Species::Dog => "dog",
            Species::Cat => "cat",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == raw)
    }

    pub fn label(self) -> &'static str {
        match self {
            Species::Dog => "Cachorro",
            Species::Cat => "Gato",
        }
    }

    pub fn breeds(self) -> &'static [&'static str] {
        match self {
            Species::Dog => DOG_BREEDS,
            Species::Cat => CAT_BREEDS,
        }
    }

    pub fn vaccines(self) -> &'static [&'static str] {
        match self {
            Species::Dog => DOG_VACCINES,
            Species::Cat => CAT_VACCINES,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub const ALL: [Sex; 2] = [Sex::Male, Sex::Female];

    pub fn as_str(self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == raw)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Size {
    Small,
    Medium,
    Large,
}

impl Size {
    pub const ALL: [Size; 3] = [Size::Small, Size::Medium, Size::Large];

    pub fn as_str(self) -> &'static str {
        match self {
            Size::Small => "small",
            Size::Medium => "medium",
            Size::Large => "large",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == raw)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimalStatus {
    Available,
    InProcess,
    Adopted,
}

/// Card shown in the feed and in favorites.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimalSummary {
    pub id: AnimalId,
    pub name: String,
    pub species: Species,
    pub sex: Sex,
    pub size: Size,
    pub age_years: u8,
    pub city: Option<String>,
    pub state: Option<String>,
    pub photo_url: Option<String>,
    pub ong_id: OngId,
    pub ong_name: String,
    pub status: AnimalStatus,
}

/// Full animal profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Animal {
    pub id: AnimalId,
    pub ong_id: OngId,
    pub name: String,
    pub species: Species,
    pub breed: String,
    pub sex: Sex,
    pub size: Size,
    pub age_years: u8,
    pub vaccinated: bool,
    #[serde(default)]
    pub vaccines: Vec<String>,
    pub neutered: bool,
    pub special_needs: bool,
    pub special_needs_description: Option<String>,
    pub description: String,
    #[serde(default)]
    pub photo_urls: Vec<String>,
    pub status: AnimalStatus,
    pub created_at: DateTime<Utc>,
}

/// Structured part of an animal create/update request. Photos travel as
/// separate multipart parts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimalPayload {
    pub name: String,
    pub species: Species,
    pub breed: String,
    pub sex: Sex,
    pub size: Size,
    pub age_years: u8,
    pub vaccinated: bool,
    pub vaccines: Vec<String>,
    pub neutered: bool,
    pub special_needs: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_needs_description: Option<String>,
    pub description: String,
    /// Already uploaded photos to keep on update.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keep_photo_urls: Vec<String>,
}

/// Feed filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimalQuery {
    pub species: Option<Species>,
    pub size: Option<Size>,
    pub city: Option<String>,
}

impl AnimalQuery {
    /// Query-string pairs, without pagination.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(species) = self.species {
            pairs.push(("species", species.as_str().to_string()));
        }
        if let Some(size) = self.size {
            pairs.push(("size", size.as_str().to_string()));
        }
        if let Some(city) = self.city.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
            pairs.push(("city", city.to_string()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalogs_are_species_specific() {
        assert!(Species::Dog.breeds().contains(&"Labrador"));
        assert!(!Species::Cat.breeds().contains(&"Labrador"));
        assert!(Species::Cat.breeds().contains(&MIXED_BREED));
        assert!(Species::Dog.vaccines().contains(&"Antirrábica"));
        assert!(Species::Cat.vaccines().contains(&"Antirrábica"));
        assert!(!Species::Cat.vaccines().contains(&"V10"));
    }

    #[test]
    fn enums_use_snake_case_on_the_wire() {
        assert_eq!(
            serde_json::to_string(&AnimalStatus::InProcess).unwrap(),
            "\"in_process\""
        );
        assert_eq!(Species::parse("cat"), Some(Species::Cat));
        assert_eq!(Size::parse("huge"), None);
    }

    #[test]
    fn query_pairs_skip_empty_filters() {
        let query = AnimalQuery {
            species: Some(Species::Dog),
            size: None,
            city: Some("  ".into()),
        };
        assert_eq!(query.to_pairs(), vec![("species", "dog".to_string())]);
    }
}
