//! Shelter profile edit, seeded from the public profile.

use crate::error::ApiError;
use crate::form::{Draft, FieldCheck, FileRef, ValidationErrors};
use crate::models::{AddressLookup, OngProfile, OngProfileUpdate};
use crate::wizard::StepDefinition;

use super::{optional_text, required_digits, required_text, single_file, with_text, AddressFields};

crate::form_fields! {
    pub enum OngProfileField {
        Name => "name",
        Phone => "phone",
        Description => "description",
        Logo => "logo",
        Cep => "cep",
        Street => "street",
        Number => "number",
        Complement => "complement",
        Neighborhood => "neighborhood",
        City => "city",
        State => "state",
    }
}

const ADDRESS: AddressFields<OngProfileField> = AddressFields {
    cep: OngProfileField::Cep,
    street: OngProfileField::Street,
    number: OngProfileField::Number,
    complement: OngProfileField::Complement,
    neighborhood: OngProfileField::Neighborhood,
    city: OngProfileField::City,
    state: OngProfileField::State,
};

pub static STEPS: [StepDefinition<OngProfileField>; 1] = [StepDefinition {
    index: 1,
    title: "Perfil da ONG",
    required: &[
        OngProfileField::Name,
        OngProfileField::Phone,
        OngProfileField::Cep,
        OngProfileField::Street,
        OngProfileField::Number,
        OngProfileField::Neighborhood,
        OngProfileField::City,
        OngProfileField::State,
    ],
    validate,
}];

fn validate(draft: &Draft<OngProfileField>) -> ValidationErrors<OngProfileField> {
    let mut check = FieldCheck::new(draft);
    check
        .max_chars(OngProfileField::Name, 120)
        .phone(OngProfileField::Phone)
        .max_chars(OngProfileField::Description, 500)
        .files_between(OngProfileField::Logo, 0, 1);
    ADDRESS.check(&mut check);
    check.finish()
}

/// The current logo stays on the server unless a new file is picked.
pub fn seed_from(profile: &OngProfile) -> Draft<OngProfileField> {
    let draft = Draft::new()
        .with(OngProfileField::Name, profile.name.as_str())
        .with(OngProfileField::Phone, profile.phone.as_str());
    let draft = with_text(draft, OngProfileField::Description, profile.description.as_deref());
    ADDRESS.seed(draft, &profile.address)
}

pub fn to_update(
    draft: &Draft<OngProfileField>,
) -> Result<(OngProfileUpdate, Option<FileRef>), ApiError> {
    let update = OngProfileUpdate {
        name: required_text(draft, OngProfileField::Name)?,
        phone: required_digits(draft, OngProfileField::Phone)?,
        description: optional_text(draft, OngProfileField::Description),
        address: ADDRESS.read(draft)?,
    };
    Ok((update, single_file(draft, OngProfileField::Logo)))
}

pub fn address_patch(lookup: &AddressLookup) -> Draft<OngProfileField> {
    ADDRESS.lookup_patch(lookup)
}
