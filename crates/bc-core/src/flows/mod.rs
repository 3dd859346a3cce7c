//! Concrete forms of the app: field enums, step tables, validators and the
//! conversions between drafts and backend payloads.

pub mod animal_form;
pub mod login;
pub mod ong_profile;
pub mod ong_signup;
pub mod user_profile;
pub mod user_signup;

use crate::error::ApiError;
use crate::form::{rules, Draft, FieldCheck, FileRef, FormField};
use crate::models::{Address, AddressLookup};

/// Message shown next to an unchecked terms box.
pub const MSG_TERMS: &str = "Aceite os termos de uso para continuar.";

fn missing<F: FormField>(field: F) -> ApiError {
    ApiError::InvalidPayload(format!("missing field `{}`", field.key()))
}

pub(crate) fn required_text<F: FormField>(draft: &Draft<F>, field: F) -> Result<String, ApiError> {
    draft
        .text(field)
        .map(str::to_string)
        .ok_or_else(|| missing(field))
}

pub(crate) fn optional_text<F: FormField>(draft: &Draft<F>, field: F) -> Option<String> {
    draft.text(field).map(str::to_string)
}

pub(crate) fn required_digits<F: FormField>(
    draft: &Draft<F>,
    field: F,
) -> Result<String, ApiError> {
    required_text(draft, field).map(|text| rules::digits_only(&text))
}

pub(crate) fn single_file<F: FormField>(draft: &Draft<F>, field: F) -> Option<FileRef> {
    draft.files(field).first().cloned()
}

/// Seeds `field` only when `value` carries text.
pub(crate) fn with_text<F: FormField>(draft: Draft<F>, field: F, value: Option<&str>) -> Draft<F> {
    match value.map(str::trim).filter(|text| !text.is_empty()) {
        Some(text) => draft.with(field, text),
        None => draft,
    }
}

/// Maps the address block shared by the shelter forms onto one field enum.
#[derive(Debug, Clone, Copy)]
pub(crate) struct AddressFields<F> {
    pub cep: F,
    pub street: F,
    pub number: F,
    pub complement: F,
    pub neighborhood: F,
    pub city: F,
    pub state: F,
}

impl<F: FormField> AddressFields<F> {
    pub fn check(&self, check: &mut FieldCheck<'_, F>) {
        check
            .cep(self.cep)
            .state(self.state)
            .max_chars(self.street, 120)
            .max_chars(self.number, 10)
            .max_chars(self.complement, 60);
    }

    pub fn read(&self, draft: &Draft<F>) -> Result<Address, ApiError> {
        Ok(Address {
            cep: required_digits(draft, self.cep)?,
            street: required_text(draft, self.street)?,
            number: required_text(draft, self.number)?,
            complement: optional_text(draft, self.complement),
            neighborhood: required_text(draft, self.neighborhood)?,
            city: required_text(draft, self.city)?,
            state: required_text(draft, self.state)?.to_ascii_uppercase(),
        })
    }

    pub fn seed(&self, draft: Draft<F>, address: &Address) -> Draft<F> {
        let draft = with_text(draft, self.cep, Some(address.cep.as_str()));
        let draft = with_text(draft, self.street, Some(address.street.as_str()));
        let draft = with_text(draft, self.number, Some(address.number.as_str()));
        let draft = with_text(draft, self.complement, address.complement.as_deref());
        let draft = with_text(draft, self.neighborhood, Some(address.neighborhood.as_str()));
        let draft = with_text(draft, self.city, Some(address.city.as_str()));
        with_text(draft, self.state, Some(address.state.as_str()))
    }

    /// Fields filled by a CEP lookup. Number and complement are left to the
    /// user.
    pub fn lookup_patch(&self, lookup: &AddressLookup) -> Draft<F> {
        let draft = Draft::new();
        let draft = with_text(draft, self.street, lookup.street.as_deref());
        let draft = with_text(draft, self.neighborhood, lookup.neighborhood.as_deref());
        let draft = with_text(draft, self.city, Some(lookup.city.as_str()));
        with_text(draft, self.state, Some(lookup.state.as_str()))
    }
}
