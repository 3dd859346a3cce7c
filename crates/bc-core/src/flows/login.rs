//! Login form. Not a wizard: one validator and the credential conversion.

use crate::error::ApiError;
use crate::form::{Draft, FieldCheck, ValidationErrors};
use crate::models::Credentials;

use super::required_text;

crate::form_fields! {
    pub enum LoginField {
        Email => "email",
        Password => "password",
    }
}

pub fn validate(draft: &Draft<LoginField>) -> ValidationErrors<LoginField> {
    let mut check = FieldCheck::new(draft);
    check
        .required(LoginField::Email)
        .email(LoginField::Email)
        .required(LoginField::Password);
    check.finish()
}

pub fn to_credentials(draft: &Draft<LoginField>) -> Result<Credentials, ApiError> {
    Ok(Credentials {
        email: required_text(draft, LoginField::Email)?.to_lowercase(),
        // passwords are sent untrimmed
        password: draft
            .get(LoginField::Password)
            .and_then(|value| value.as_text())
            .filter(|text| !text.is_empty())
            .map(str::to_string)
            .ok_or_else(|| super::missing(LoginField::Password))?,
    })
}
