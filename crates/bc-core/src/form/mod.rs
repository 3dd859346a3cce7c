//! Form primitives: typed field keys, the draft store and field validators.

mod draft;
mod field;
pub mod lookup;
pub mod rules;
mod validation;

pub use draft::Draft;
pub use field::{FieldValue, FileRef, FormField, UnknownField};
pub use lookup::{LookupKind, LookupTrigger};
pub use validation::{FieldCheck, ValidationErrors, Validator};
pub use validation::{
    MSG_CEP, MSG_CNPJ, MSG_CPF, MSG_EMAIL, MSG_OPTION, MSG_PASSWORD_MISMATCH, MSG_PHONE,
    MSG_REQUIRED, MSG_STATE,
};
