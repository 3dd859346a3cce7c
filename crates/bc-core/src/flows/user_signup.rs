//! Adopter registration, a single-step form.

use crate::error::ApiError;
use crate::form::{Draft, FieldCheck, ValidationErrors};
use crate::models::UserSignup;
use crate::wizard::StepDefinition;

use super::{required_digits, required_text, MSG_TERMS};

crate::form_fields! {
    pub enum UserSignupField {
        Name => "name",
        Email => "email",
        Cpf => "cpf",
        Phone => "phone",
        Password => "password",
        ConfirmPassword => "confirm_password",
        AcceptTerms => "accept_terms",
    }
}

pub static STEPS: [StepDefinition<UserSignupField>; 1] = [StepDefinition {
    index: 1,
    title: "Cadastro",
    required: &[
        UserSignupField::Name,
        UserSignupField::Email,
        UserSignupField::Cpf,
        UserSignupField::Phone,
        UserSignupField::Password,
        UserSignupField::ConfirmPassword,
    ],
    validate,
}];

fn validate(draft: &Draft<UserSignupField>) -> ValidationErrors<UserSignupField> {
    let mut check = FieldCheck::new(draft);
    check
        .min_chars(UserSignupField::Name, 3)
        .max_chars(UserSignupField::Name, 120)
        .email(UserSignupField::Email)
        .cpf(UserSignupField::Cpf)
        .phone(UserSignupField::Phone)
        .password(UserSignupField::Password)
        .matches(UserSignupField::ConfirmPassword, UserSignupField::Password)
        .accepted(UserSignupField::AcceptTerms, MSG_TERMS);
    check.finish()
}

pub fn to_signup(draft: &Draft<UserSignupField>) -> Result<UserSignup, ApiError> {
    Ok(UserSignup {
        name: required_text(draft, UserSignupField::Name)?,
        email: required_text(draft, UserSignupField::Email)?.to_lowercase(),
        cpf: required_digits(draft, UserSignupField::Cpf)?,
        phone: required_digits(draft, UserSignupField::Phone)?,
        password: required_text(draft, UserSignupField::Password)?,
    })
}
