//! Adopter profile edit, seeded from the stored profile.

use crate::error::ApiError;
use crate::form::{Draft, FieldCheck, ValidationErrors};
use crate::models::{UserProfile, UserProfileUpdate};
use crate::wizard::StepDefinition;

use super::{optional_text, required_text, with_text};

crate::form_fields! {
    pub enum UserProfileField {
        Name => "name",
        Phone => "phone",
        City => "city",
        State => "state",
        Bio => "bio",
    }
}

pub static STEPS: [StepDefinition<UserProfileField>; 1] = [StepDefinition {
    index: 1,
    title: "Meu perfil",
    required: &[UserProfileField::Name],
    validate,
}];

fn validate(draft: &Draft<UserProfileField>) -> ValidationErrors<UserProfileField> {
    let mut check = FieldCheck::new(draft);
    check
        .min_chars(UserProfileField::Name, 3)
        .max_chars(UserProfileField::Name, 120)
        .phone(UserProfileField::Phone)
        .max_chars(UserProfileField::City, 80)
        .state(UserProfileField::State)
        .max_chars(UserProfileField::Bio, 300);
    check.finish()
}

pub fn seed_from(profile: &UserProfile) -> Draft<UserProfileField> {
    let draft = Draft::new().with(UserProfileField::Name, profile.name.as_str());
    let draft = with_text(draft, UserProfileField::Phone, profile.phone.as_deref());
    let draft = with_text(draft, UserProfileField::City, profile.city.as_deref());
    let draft = with_text(draft, UserProfileField::State, profile.state.as_deref());
    with_text(draft, UserProfileField::Bio, profile.bio.as_deref())
}

pub fn to_update(draft: &Draft<UserProfileField>) -> Result<UserProfileUpdate, ApiError> {
    Ok(UserProfileUpdate {
        name: required_text(draft, UserProfileField::Name)?,
        phone: optional_text(draft, UserProfileField::Phone),
        city: optional_text(draft, UserProfileField::City),
        state: optional_text(draft, UserProfileField::State).map(|uf| uf.to_ascii_uppercase()),
        bio: optional_text(draft, UserProfileField::Bio),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::UserId;

    fn profile() -> UserProfile {
        UserProfile {
            id: UserId::from_str("u1"),
            name: "Ana Lima".into(),
            email: "ana@example.com".into(),
            phone: None,
            city: Some("Olinda".into()),
            state: Some("PE".into()),
            bio: Some("".into()),
            avatar_url: None,
        }
    }

    #[test]
    fn seed_skips_empty_values() {
        let draft = seed_from(&profile());
        assert_eq!(draft.text(UserProfileField::City), Some("Olinda"));
        assert!(!draft.contains(UserProfileField::Phone));
        assert!(!draft.contains(UserProfileField::Bio));
        assert!(STEPS[0].errors(&draft).is_empty());
    }

    #[test]
    fn optional_fields_are_checked_only_when_filled() {
        let draft = seed_from(&profile()).with(UserProfileField::State, "XX");
        let errors = STEPS[0].errors(&draft);
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec![UserProfileField::State]);
    }

    #[test]
    fn update_round_trips_seed() {
        let update = to_update(&seed_from(&profile())).unwrap();
        assert_eq!(update.name, "Ana Lima");
        assert_eq!(update.state.as_deref(), Some("PE"));
        assert_eq!(update.bio, None);
    }
}
