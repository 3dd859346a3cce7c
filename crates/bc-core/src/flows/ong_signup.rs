//! Shelter (ONG) registration wizard.
//!
//! Shelters without a CNPJ register under the responsible person's CPF; the
//! `has_cnpj` toggle decides which of the two documents is kept.

use crate::error::ApiError;
use crate::form::{rules, Draft, FieldCheck, FileRef, ValidationErrors};
use crate::models::{AddressLookup, CompanyRecord, OngSignup};
use crate::wizard::StepDefinition;

use super::{
    optional_text, required_digits, required_text, single_file, with_text, AddressFields,
    MSG_TERMS,
};

crate::form_fields! {
    pub enum OngSignupField cascade(stale_dependents) {
        ResponsibleName => "responsible_name",
        Email => "email",
        Password => "password",
        ConfirmPassword => "confirm_password",
        Name => "name",
        HasCnpj => "has_cnpj",
        Cnpj => "cnpj",
        Cpf => "cpf",
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
        AcceptTerms => "accept_terms",
    }
}

const ADDRESS: AddressFields<OngSignupField> = AddressFields {
    cep: OngSignupField::Cep,
    street: OngSignupField::Street,
    number: OngSignupField::Number,
    complement: OngSignupField::Complement,
    neighborhood: OngSignupField::Neighborhood,
    city: OngSignupField::City,
    state: OngSignupField::State,
};

pub static STEPS: [StepDefinition<OngSignupField>; 4] = [
    StepDefinition {
        index: 1,
        title: "Conta",
        required: &[
            OngSignupField::ResponsibleName,
            OngSignupField::Email,
            OngSignupField::Password,
            OngSignupField::ConfirmPassword,
        ],
        validate: validate_account,
    },
    StepDefinition {
        index: 2,
        title: "Organização",
        required: &[OngSignupField::Name, OngSignupField::Phone],
        validate: validate_organization,
    },
    StepDefinition {
        index: 3,
        title: "Endereço",
        required: &[
            OngSignupField::Cep,
            OngSignupField::Street,
            OngSignupField::Number,
            OngSignupField::Neighborhood,
            OngSignupField::City,
            OngSignupField::State,
        ],
        validate: validate_address,
    },
    StepDefinition {
        index: 4,
        title: "Revisão",
        required: &[],
        validate: validate_review,
    },
];

fn stale_dependents(field: OngSignupField, draft: &Draft<OngSignupField>) -> Vec<OngSignupField> {
    match field {
        OngSignupField::HasCnpj if draft.flag(OngSignupField::HasCnpj) => vec![OngSignupField::Cpf],
        OngSignupField::HasCnpj => vec![OngSignupField::Cnpj],
        _ => Vec::new(),
    }
}

fn validate_account(draft: &Draft<OngSignupField>) -> ValidationErrors<OngSignupField> {
    let mut check = FieldCheck::new(draft);
    check
        .min_chars(OngSignupField::ResponsibleName, 3)
        .email(OngSignupField::Email)
        .password(OngSignupField::Password)
        .matches(OngSignupField::ConfirmPassword, OngSignupField::Password);
    check.finish()
}

fn validate_organization(draft: &Draft<OngSignupField>) -> ValidationErrors<OngSignupField> {
    let mut check = FieldCheck::new(draft);
    if draft.flag(OngSignupField::HasCnpj) {
        check
            .required(OngSignupField::Cnpj)
            .cnpj(OngSignupField::Cnpj);
    } else {
        check.required(OngSignupField::Cpf).cpf(OngSignupField::Cpf);
    }
    check
        .max_chars(OngSignupField::Name, 120)
        .phone(OngSignupField::Phone)
        .max_chars(OngSignupField::Description, 500)
        .files_between(OngSignupField::Logo, 0, 1);
    check.finish()
}

fn validate_address(draft: &Draft<OngSignupField>) -> ValidationErrors<OngSignupField> {
    let mut check = FieldCheck::new(draft);
    ADDRESS.check(&mut check);
    check.finish()
}

fn validate_review(draft: &Draft<OngSignupField>) -> ValidationErrors<OngSignupField> {
    let mut check = FieldCheck::new(draft);
    check.accepted(OngSignupField::AcceptTerms, MSG_TERMS);
    check.finish()
}

/// Signup payload plus the optional logo.
pub fn to_signup(draft: &Draft<OngSignupField>) -> Result<(OngSignup, Option<FileRef>), ApiError> {
    let has_cnpj = draft.flag(OngSignupField::HasCnpj);
    let signup = OngSignup {
        responsible_name: required_text(draft, OngSignupField::ResponsibleName)?,
        email: required_text(draft, OngSignupField::Email)?.to_lowercase(),
        password: required_text(draft, OngSignupField::Password)?,
        name: required_text(draft, OngSignupField::Name)?,
        cnpj: if has_cnpj {
            Some(required_digits(draft, OngSignupField::Cnpj)?)
        } else {
            None
        },
        responsible_cpf: if has_cnpj {
            None
        } else {
            Some(required_digits(draft, OngSignupField::Cpf)?)
        },
        phone: required_digits(draft, OngSignupField::Phone)?,
        description: optional_text(draft, OngSignupField::Description),
        address: ADDRESS.read(draft)?,
    };
    Ok((signup, single_file(draft, OngSignupField::Logo)))
}

/// Address fields filled from a CEP lookup.
pub fn address_patch(lookup: &AddressLookup) -> Draft<OngSignupField> {
    ADDRESS.lookup_patch(lookup)
}

/// Organization name and, when the registry knows it, the address of a
/// company found by CNPJ. Fields the user already typed are overwritten.
pub fn company_patch(record: &CompanyRecord) -> Draft<OngSignupField> {
    let mut patch = Draft::new().with(OngSignupField::Name, record.display_name());
    if let Some(address) = &record.address {
        patch.merge(ADDRESS.lookup_patch(address));
        patch = with_text(
            patch,
            OngSignupField::Cep,
            Some(rules::digits_only(&address.cep).as_str()),
        );
    }
    patch
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::{can_reach, is_step_satisfied};

    fn account() -> Draft<OngSignupField> {
        Draft::new()
            .with(OngSignupField::ResponsibleName, "Maria Souza")
            .with(OngSignupField::Email, "contato@patasunidas.org")
            .with(OngSignupField::Password, "abc123")
            .with(OngSignupField::ConfirmPassword, "abc123")
    }

    fn complete() -> Draft<OngSignupField> {
        account()
            .with(OngSignupField::Name, "Patas Unidas")
            .with(OngSignupField::HasCnpj, true)
            .with(OngSignupField::Cnpj, "11.222.333/0001-81")
            .with(OngSignupField::Phone, "(81) 99876-5432")
            .with(OngSignupField::Cep, "50030-230")
            .with(OngSignupField::Street, "Rua da Aurora")
            .with(OngSignupField::Number, "100")
            .with(OngSignupField::Neighborhood, "Boa Vista")
            .with(OngSignupField::City, "Recife")
            .with(OngSignupField::State, "pe")
            .with(OngSignupField::AcceptTerms, true)
    }

    #[test]
    fn password_mismatch_is_reported_on_confirmation() {
        let draft = account().with(OngSignupField::ConfirmPassword, "abc124");
        let errors = STEPS[0].errors(&draft);
        assert_eq!(errors.len(), 1);
        assert!(errors.contains(OngSignupField::ConfirmPassword));
        assert!(!can_reach(&STEPS, 2, &draft));
    }

    #[test]
    fn document_follows_has_cnpj_toggle() {
        let mut draft = complete();
        assert!(is_step_satisfied(&STEPS, 2, &draft));

        assert_eq!(
            draft.set(OngSignupField::HasCnpj, false),
            vec![OngSignupField::Cnpj]
        );
        assert!(STEPS[1].errors(&draft).contains(OngSignupField::Cpf));

        draft.set(OngSignupField::Cpf, "529.982.247-25");
        assert!(is_step_satisfied(&STEPS, 2, &draft));
        assert_eq!(
            draft.set(OngSignupField::HasCnpj, true),
            vec![OngSignupField::Cpf]
        );
    }

    #[test]
    fn invalid_cnpj_blocks_organization_step() {
        let draft = complete().with(OngSignupField::Cnpj, "11.222.333/0001-80");
        assert!(!can_reach(&STEPS, 3, &draft));
    }

    #[test]
    fn terms_gate_the_review_step() {
        let draft = complete().with(OngSignupField::AcceptTerms, false);
        assert_eq!(
            STEPS[3].errors(&draft).get(OngSignupField::AcceptTerms),
            Some(MSG_TERMS)
        );
    }

    #[test]
    fn signup_payload_normalizes_documents() {
        let (signup, logo) = to_signup(&complete()).unwrap();
        assert_eq!(signup.cnpj.as_deref(), Some("11222333000181"));
        assert_eq!(signup.responsible_cpf, None);
        assert_eq!(signup.phone, "81998765432");
        assert_eq!(signup.address.cep, "50030230");
        assert_eq!(signup.address.state, "PE");
        assert!(logo.is_none());
    }

    #[test]
    fn company_patch_fills_name_and_address() {
        let record = CompanyRecord {
            cnpj: "11222333000181".into(),
            legal_name: "Associação Patas Unidas".into(),
            trade_name: None,
            active: true,
            address: Some(AddressLookup {
                cep: "50030-230".into(),
                street: Some("Rua da Aurora".into()),
                neighborhood: None,
                city: "Recife".into(),
                state: "PE".into(),
            }),
        };
        let patch = company_patch(&record);
        assert_eq!(patch.text(OngSignupField::Name), Some("Associação Patas Unidas"));
        assert_eq!(patch.text(OngSignupField::Cep), Some("50030230"));
        assert_eq!(patch.text(OngSignupField::City), Some("Recife"));
        assert!(!patch.contains(OngSignupField::Neighborhood));
        assert!(!patch.contains(OngSignupField::Number));
    }
}
