//! Animal registration form, used both to create a listing and, seeded from
//! an existing [`Animal`], to edit it.

use crate::error::ApiError;
use crate::form::{Draft, FieldCheck, FileRef, ValidationErrors};
use crate::models::{Animal, AnimalPayload, Sex, Size, Species};
use crate::wizard::{no_checks, StepDefinition};

use super::{missing, optional_text, required_text, with_text};

pub const MAX_PHOTOS: usize = 5;
pub const DESCRIPTION_MIN_CHARS: usize = 20;
pub const DESCRIPTION_MAX_CHARS: usize = 1000;
pub const MAX_AGE_YEARS: f64 = 30.0;

const SPECIES_OPTIONS: &[&str] = &["dog", "cat"];
const SEX_OPTIONS: &[&str] = &["male", "female"];
const SIZE_OPTIONS: &[&str] = &["small", "medium", "large"];

crate::form_fields! {
    pub enum AnimalField cascade(stale_dependents) {
        Name => "name",
        Species => "species",
        Breed => "breed",
        Sex => "sex",
        Size => "size",
        AgeYears => "age_years",
        Vaccinated => "vaccinated",
        Vaccines => "vaccines",
        Neutered => "neutered",
        SpecialNeeds => "special_needs",
        SpecialNeedsDescription => "special_needs_description",
        Photos => "photos",
        ExistingPhotos => "existing_photos",
        Description => "description",
    }
}

pub static STEPS: [StepDefinition<AnimalField>; 4] = [
    StepDefinition {
        index: 1,
        title: "Dados básicos",
        required: &[
            AnimalField::Name,
            AnimalField::Species,
            AnimalField::Breed,
            AnimalField::Sex,
            AnimalField::Size,
            AnimalField::AgeYears,
        ],
        validate: validate_basics,
    },
    StepDefinition {
        index: 2,
        title: "Saúde",
        required: &[],
        validate: validate_health,
    },
    StepDefinition {
        index: 3,
        title: "Fotos e descrição",
        required: &[AnimalField::Description],
        validate: validate_presentation,
    },
    StepDefinition {
        index: 4,
        title: "Revisão",
        required: &[],
        validate: no_checks,
    },
];

fn species(draft: &Draft<AnimalField>) -> Option<Species> {
    draft.text(AnimalField::Species).and_then(Species::parse)
}

fn stale_dependents(field: AnimalField, draft: &Draft<AnimalField>) -> Vec<AnimalField> {
    let mut stale = Vec::new();
    match field {
        AnimalField::Species => {
            let species = species(draft);
            let breed_ok = match (species, draft.text(AnimalField::Breed)) {
                (_, None) => true,
                (Some(species), Some(breed)) => species.breeds().contains(&breed),
                (None, Some(_)) => false,
            };
            if !breed_ok {
                stale.push(AnimalField::Breed);
            }
            let vaccines_ok = draft.list(AnimalField::Vaccines).iter().all(|vaccine| {
                species.map_or(false, |species| species.vaccines().contains(&vaccine.as_str()))
            });
            if !vaccines_ok {
                stale.push(AnimalField::Vaccines);
            }
        }
        AnimalField::Vaccinated if !draft.flag(AnimalField::Vaccinated) => {
            stale.push(AnimalField::Vaccines);
        }
        AnimalField::SpecialNeeds if !draft.flag(AnimalField::SpecialNeeds) => {
            stale.push(AnimalField::SpecialNeedsDescription);
        }
        _ => {}
    }
    stale
}

fn validate_basics(draft: &Draft<AnimalField>) -> ValidationErrors<AnimalField> {
    let mut check = FieldCheck::new(draft);
    check
        .min_chars(AnimalField::Name, 2)
        .max_chars(AnimalField::Name, 60)
        .one_of(AnimalField::Species, SPECIES_OPTIONS)
        .one_of(AnimalField::Sex, SEX_OPTIONS)
        .one_of(AnimalField::Size, SIZE_OPTIONS)
        .number_range(AnimalField::AgeYears, 0.0, MAX_AGE_YEARS);
    if let Some(species) = species(draft) {
        check.one_of(AnimalField::Breed, species.breeds());
    }
    check.finish()
}

fn validate_health(draft: &Draft<AnimalField>) -> ValidationErrors<AnimalField> {
    let mut check = FieldCheck::new(draft);
    if draft.flag(AnimalField::Vaccinated) {
        check.required(AnimalField::Vaccines);
        if let Some(species) = species(draft) {
            check.each_one_of(AnimalField::Vaccines, species.vaccines());
        }
    }
    if draft.flag(AnimalField::SpecialNeeds) {
        check
            .required(AnimalField::SpecialNeedsDescription)
            .max_chars(AnimalField::SpecialNeedsDescription, 500);
    }
    check.finish()
}

fn validate_presentation(draft: &Draft<AnimalField>) -> ValidationErrors<AnimalField> {
    let photo_count =
        draft.files(AnimalField::Photos).len() + draft.list(AnimalField::ExistingPhotos).len();
    let mut check = FieldCheck::new(draft);
    if photo_count == 0 {
        check.fail(AnimalField::Photos, "Adicione pelo menos uma foto.");
    } else if photo_count > MAX_PHOTOS {
        check.fail(
            AnimalField::Photos,
            format!("Envie no máximo {MAX_PHOTOS} fotos."),
        );
    }
    check
        .min_chars(AnimalField::Description, DESCRIPTION_MIN_CHARS)
        .max_chars(AnimalField::Description, DESCRIPTION_MAX_CHARS);
    check.finish()
}

fn parse_choice<T>(
    draft: &Draft<AnimalField>,
    field: AnimalField,
    parse: fn(&str) -> Option<T>,
) -> Result<T, ApiError> {
    let raw = required_text(draft, field)?;
    parse(&raw).ok_or_else(|| {
        ApiError::InvalidPayload(format!("invalid value `{raw}` for field `{field}`"))
    })
}

/// Structured payload plus the newly selected photos.
pub fn to_payload(draft: &Draft<AnimalField>) -> Result<(AnimalPayload, Vec<FileRef>), ApiError> {
    let age = draft
        .number(AnimalField::AgeYears)
        .filter(|age| (0.0..=MAX_AGE_YEARS).contains(age))
        .ok_or_else(|| missing(AnimalField::AgeYears))?;
    let vaccinated = draft.flag(AnimalField::Vaccinated);
    let special_needs = draft.flag(AnimalField::SpecialNeeds);

    let payload = AnimalPayload {
        name: required_text(draft, AnimalField::Name)?,
        species: parse_choice(draft, AnimalField::Species, Species::parse)?,
        breed: required_text(draft, AnimalField::Breed)?,
        sex: parse_choice(draft, AnimalField::Sex, Sex::parse)?,
        size: parse_choice(draft, AnimalField::Size, Size::parse)?,
        age_years: age.round() as u8,
        vaccinated,
        vaccines: if vaccinated {
            draft.list(AnimalField::Vaccines).to_vec()
        } else {
            Vec::new()
        },
        neutered: draft.flag(AnimalField::Neutered),
        special_needs,
        special_needs_description: special_needs
            .then(|| optional_text(draft, AnimalField::SpecialNeedsDescription))
            .flatten(),
        description: required_text(draft, AnimalField::Description)?,
        keep_photo_urls: draft.list(AnimalField::ExistingPhotos).to_vec(),
    };
    Ok((payload, draft.files(AnimalField::Photos).to_vec()))
}

/// Draft for editing an existing listing. Uploaded photos are kept by URL.
pub fn seed_from(animal: &Animal) -> Draft<AnimalField> {
    let draft = Draft::new()
        .with(AnimalField::Name, animal.name.as_str())
        .with(AnimalField::Species, animal.species.as_str())
        .with(AnimalField::Breed, animal.breed.as_str())
        .with(AnimalField::Sex, animal.sex.as_str())
        .with(AnimalField::Size, animal.size.as_str())
        .with(AnimalField::AgeYears, u32::from(animal.age_years))
        .with(AnimalField::Vaccinated, animal.vaccinated)
        .with(AnimalField::Vaccines, animal.vaccines.clone())
        .with(AnimalField::Neutered, animal.neutered)
        .with(AnimalField::SpecialNeeds, animal.special_needs)
        .with(AnimalField::ExistingPhotos, animal.photo_urls.clone())
        .with(AnimalField::Description, animal.description.as_str());
    with_text(
        draft,
        AnimalField::SpecialNeedsDescription,
        animal.special_needs_description.as_deref(),
    )
}
