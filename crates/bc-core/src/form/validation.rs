//! Field validators.
//!
//! A validator is a pure function from a draft to a map of field → message.
//! An empty map means the checked fields are valid.

use std::collections::BTreeMap;

use serde::Serialize;

use super::rules;
use super::{Draft, FormField};

pub type Validator<F> = fn(&Draft<F>) -> ValidationErrors<F>;

pub const MSG_REQUIRED: &str = "Campo obrigatório.";
pub const MSG_EMAIL: &str = "Informe um e-mail válido.";
pub const MSG_PHONE: &str = "Informe um telefone válido com DDD.";
pub const MSG_CEP: &str = "Informe um CEP válido.";
pub const MSG_CPF: &str = "CPF inválido.";
pub const MSG_CNPJ: &str = "CNPJ inválido.";
pub const MSG_STATE: &str = "Selecione um estado válido.";
pub const MSG_OPTION: &str = "Selecione uma opção válida.";
pub const MSG_PASSWORD_MISMATCH: &str = "As senhas não coincidem.";

/// Validation result keyed by field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors<F: FormField> {
    errors: BTreeMap<F, String>,
}

impl<F: FormField> Default for ValidationErrors<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: FormField> ValidationErrors<F> {
    pub fn new() -> Self {
        Self {
            errors: BTreeMap::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn get(&self, field: F) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: F) -> bool {
        self.errors.contains_key(&field)
    }

    /// The first message recorded for a field wins.
    pub fn insert(&mut self, field: F, message: impl Into<String>) {
        self.errors.entry(field).or_insert_with(|| message.into());
    }

    pub fn extend(&mut self, other: ValidationErrors<F>) {
        for (field, message) in other.errors {
            self.insert(field, message);
        }
    }

    pub fn retain(&mut self, mut keep: impl FnMut(F) -> bool) {
        self.errors.retain(|field, _| keep(*field));
    }

    pub fn fields(&self) -> impl Iterator<Item = F> + '_ {
        self.errors.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (F, &str)> {
        self.errors
            .iter()
            .map(|(field, message)| (*field, message.as_str()))
    }
}

/// Accumulates rule violations for one draft.
///
/// Format rules skip blank values so optional fields are only checked when
/// filled in; pair them with [`FieldCheck::required`] for mandatory ones.
pub struct FieldCheck<'a, F: FormField> {
    draft: &'a Draft<F>,
    errors: ValidationErrors<F>,
}

impl<'a, F: FormField> FieldCheck<'a, F> {
    pub fn new(draft: &'a Draft<F>) -> Self {
        Self {
            draft,
            errors: ValidationErrors::new(),
        }
    }

    pub fn finish(self) -> ValidationErrors<F> {
        self.errors
    }

    pub fn fail(&mut self, field: F, message: impl Into<String>) -> &mut Self {
        self.errors.insert(field, message);
        self
    }

    pub fn check(&mut self, field: F, ok: bool, message: &str) -> &mut Self {
        if !ok {
            self.errors.insert(field, message);
        }
        self
    }

    pub fn required(&mut self, field: F) -> &mut Self {
        let blank = self.draft.is_blank(field);
        self.check(field, !blank, MSG_REQUIRED)
    }

    /// Flag that must be switched on (terms acceptance).
    pub fn accepted(&mut self, field: F, message: &str) -> &mut Self {
        let on = self.draft.flag(field);
        self.check(field, on, message)
    }

    pub fn min_chars(&mut self, field: F, min: usize) -> &mut Self {
        if let Some(text) = self.draft.text(field) {
            if text.chars().count() < min {
                self.errors
                    .insert(field, format!("Use pelo menos {min} caracteres."));
            }
        }
        self
    }

    pub fn max_chars(&mut self, field: F, max: usize) -> &mut Self {
        if let Some(text) = self.draft.text(field) {
            if text.chars().count() > max {
                self.errors
                    .insert(field, format!("Use no máximo {max} caracteres."));
            }
        }
        self
    }

    pub fn email(&mut self, field: F) -> &mut Self {
        self.text_rule(field, rules::is_valid_email, MSG_EMAIL)
    }

    pub fn phone(&mut self, field: F) -> &mut Self {
        self.text_rule(field, rules::is_valid_phone, MSG_PHONE)
    }

    pub fn cep(&mut self, field: F) -> &mut Self {
        self.text_rule(field, rules::is_valid_cep, MSG_CEP)
    }

    pub fn cpf(&mut self, field: F) -> &mut Self {
        self.text_rule(field, rules::is_valid_cpf, MSG_CPF)
    }

    pub fn cnpj(&mut self, field: F) -> &mut Self {
        self.text_rule(field, rules::is_valid_cnpj, MSG_CNPJ)
    }

    pub fn state(&mut self, field: F) -> &mut Self {
        self.text_rule(field, rules::is_valid_state, MSG_STATE)
    }

    pub fn password(&mut self, field: F) -> &mut Self {
        self.min_chars(field, rules::MIN_PASSWORD_LEN)
    }

    /// Cross-field equality; the error is keyed on `confirmation`.
    pub fn matches(&mut self, confirmation: F, original: F) -> &mut Self {
        let left = self.draft.get(confirmation).and_then(|v| v.as_text());
        let right = self.draft.get(original).and_then(|v| v.as_text());
        if let Some(left) = left.filter(|text| !text.is_empty()) {
            if Some(left) != right {
                self.errors.insert(confirmation, MSG_PASSWORD_MISMATCH);
            }
        }
        self
    }

    pub fn one_of(&mut self, field: F, options: &[&str]) -> &mut Self {
        if let Some(text) = self.draft.text(field) {
            if !options.contains(&text) {
                self.errors.insert(field, MSG_OPTION);
            }
        }
        self
    }

    /// Every selected list item must belong to `options`.
    pub fn each_one_of(&mut self, field: F, options: &[&str]) -> &mut Self {
        let invalid = self
            .draft
            .list(field)
            .iter()
            .any(|item| !options.contains(&item.as_str()));
        self.check(field, !invalid, MSG_OPTION)
    }

    pub fn number_range(&mut self, field: F, min: f64, max: f64) -> &mut Self {
        match self.draft.get(field) {
            None => {}
            Some(value) if value.is_blank() => {}
            Some(value) => match value.as_number() {
                Some(n) if n >= min && n <= max => {}
                Some(_) => {
                    self.errors
                        .insert(field, format!("Informe um valor entre {min} e {max}."));
                }
                None => {
                    self.errors.insert(field, "Informe um número.");
                }
            },
        }
        self
    }

    pub fn files_between(&mut self, field: F, min: usize, max: usize) -> &mut Self {
        let count = self.draft.files(field).len();
        if count < min {
            self.errors
                .insert(field, format!("Envie pelo menos {min} arquivo(s)."));
        } else if count > max {
            self.errors
                .insert(field, format!("Envie no máximo {max} arquivos."));
        }
        self
    }

    fn text_rule(&mut self, field: F, rule: fn(&str) -> bool, message: &str) -> &mut Self {
        if let Some(text) = self.draft.text(field) {
            if !rule(text) {
                self.errors.insert(field, message);
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::form_fields! {
        enum AccountField {
            Email => "email",
            Password => "password",
            ConfirmPassword => "confirm_password",
            Age => "age",
        }
    }

    fn validate(draft: &Draft<AccountField>) -> ValidationErrors<AccountField> {
        let mut check = FieldCheck::new(draft);
        check
            .required(AccountField::Email)
            .email(AccountField::Email)
            .required(AccountField::Password)
            .password(AccountField::Password)
            .required(AccountField::ConfirmPassword)
            .matches(AccountField::ConfirmPassword, AccountField::Password)
            .number_range(AccountField::Age, 0.0, 30.0);
        check.finish()
    }

    #[test]
    fn password_mismatch_is_keyed_on_confirmation() {
        let draft = Draft::new()
            .with(AccountField::Email, "ana@abrigo.org")
            .with(AccountField::Password, "abc123")
            .with(AccountField::ConfirmPassword, "abc124");

        let errors = validate(&draft);
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.get(AccountField::ConfirmPassword),
            Some(MSG_PASSWORD_MISMATCH)
        );
    }

    #[test]
    fn empty_draft_reports_required_once_per_field() {
        let errors = validate(&Draft::new());
        assert_eq!(errors.get(AccountField::Email), Some(MSG_REQUIRED));
        assert_eq!(errors.get(AccountField::Password), Some(MSG_REQUIRED));
        assert!(!errors.contains(AccountField::Age));
    }

    #[test]
    fn validators_do_not_touch_the_draft() {
        let draft = Draft::new().with(AccountField::Email, "bad");
        let before = draft.clone();
        let _ = validate(&draft);
        assert_eq!(draft, before);
    }

    #[test]
    fn number_range_rejects_out_of_bounds_and_text() {
        let errors = validate(&Draft::new().with(AccountField::Age, 31u32));
        assert!(errors.contains(AccountField::Age));

        let errors = validate(&Draft::new().with(AccountField::Age, "dois"));
        assert_eq!(errors.get(AccountField::Age), Some("Informe um número."));
    }

    #[test]
    fn errors_serialize_with_field_keys() {
        let mut errors = ValidationErrors::new();
        errors.insert(AccountField::ConfirmPassword, "x");
        assert_eq!(
            serde_json::to_string(&errors).unwrap(),
            r#"{"confirm_password":"x"}"#
        );
    }
}
