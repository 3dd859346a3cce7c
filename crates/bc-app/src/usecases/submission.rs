//! Submission adapters: one per wizard, each converting the validated draft
//! into the typed payload and calling the matching port.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use bc_core::error::ApiError;
use bc_core::flows::animal_form::{self, AnimalField};
use bc_core::flows::ong_profile::{self, OngProfileField};
use bc_core::flows::ong_signup::{self, OngSignupField};
use bc_core::flows::user_profile::{self, UserProfileField};
use bc_core::flows::user_signup::{self, UserSignupField};
use bc_core::form::Draft;
use bc_core::ids::AnimalId;
use bc_core::ports::{AnimalPort, AuthPort, ProfilePort, SubmissionPort, SubmissionReceipt};

use super::session::SessionContext;

/// Adopter signup; the new account becomes the current session.
pub struct UserSignupSubmission {
    auth: Arc<dyn AuthPort>,
    session: Arc<SessionContext>,
}

impl UserSignupSubmission {
    pub fn new(auth: Arc<dyn AuthPort>, session: Arc<SessionContext>) -> Self {
        Self { auth, session }
    }
}

#[async_trait]
impl SubmissionPort<UserSignupField> for UserSignupSubmission {
    async fn submit(&self, draft: &Draft<UserSignupField>) -> Result<SubmissionReceipt, ApiError> {
        let signup = user_signup::to_signup(draft)?;
        let user = self.auth.signup_user(signup).await?;
        info!(user = %user.id, "adopter account created");
        let receipt = SubmissionReceipt::for_resource(user.id.as_str(), "Cadastro realizado!");
        self.session.set_user(user).await;
        Ok(receipt)
    }
}

/// Shelter signup with optional logo; the new account becomes the current
/// session.
pub struct OngSignupSubmission {
    auth: Arc<dyn AuthPort>,
    session: Arc<SessionContext>,
}

impl OngSignupSubmission {
    pub fn new(auth: Arc<dyn AuthPort>, session: Arc<SessionContext>) -> Self {
        Self { auth, session }
    }
}

#[async_trait]
impl SubmissionPort<OngSignupField> for OngSignupSubmission {
    async fn submit(&self, draft: &Draft<OngSignupField>) -> Result<SubmissionReceipt, ApiError> {
        let (signup, logo) = ong_signup::to_signup(draft)?;
        let user = self.auth.signup_ong(signup, logo).await?;
        info!(user = %user.id, ong = ?user.ong_id, "shelter account created");
        let resource = user
            .ong_id
            .as_ref()
            .map_or_else(|| user.id.to_string(), |id| id.to_string());
        self.session.set_user(user).await;
        Ok(SubmissionReceipt::for_resource(
            resource,
            "ONG cadastrada com sucesso!",
        ))
    }
}

/// New listing, or an update when built with [`AnimalSubmission::update`].
pub struct AnimalSubmission {
    animals: Arc<dyn AnimalPort>,
    target: Option<AnimalId>,
}

impl AnimalSubmission {
    pub fn create(animals: Arc<dyn AnimalPort>) -> Self {
        Self {
            animals,
            target: None,
        }
    }

    pub fn update(animals: Arc<dyn AnimalPort>, id: AnimalId) -> Self {
        Self {
            animals,
            target: Some(id),
        }
    }
}

#[async_trait]
impl SubmissionPort<AnimalField> for AnimalSubmission {
    async fn submit(&self, draft: &Draft<AnimalField>) -> Result<SubmissionReceipt, ApiError> {
        let (payload, photos) = animal_form::to_payload(draft)?;
        let animal = match &self.target {
            Some(id) => self.animals.update(id, payload, photos).await?,
            None => self.animals.create(payload, photos).await?,
        };
        let message = if self.target.is_some() {
            "Dados do animal atualizados."
        } else {
            "Animal cadastrado para adoção!"
        };
        info!(animal = %animal.id, update = self.target.is_some(), "animal saved");
        Ok(SubmissionReceipt::for_resource(animal.id.into_inner(), message))
    }
}

pub struct UserProfileSubmission {
    profiles: Arc<dyn ProfilePort>,
}

impl UserProfileSubmission {
    pub fn new(profiles: Arc<dyn ProfilePort>) -> Self {
        Self { profiles }
    }
}

#[async_trait]
impl SubmissionPort<UserProfileField> for UserProfileSubmission {
    async fn submit(&self, draft: &Draft<UserProfileField>) -> Result<SubmissionReceipt, ApiError> {
        let update = user_profile::to_update(draft)?;
        let profile = self.profiles.update_my_profile(update).await?;
        Ok(SubmissionReceipt::for_resource(
            profile.id.into_inner(),
            "Perfil atualizado.",
        ))
    }
}

pub struct OngProfileSubmission {
    profiles: Arc<dyn ProfilePort>,
}

impl OngProfileSubmission {
    pub fn new(profiles: Arc<dyn ProfilePort>) -> Self {
        Self { profiles }
    }
}

#[async_trait]
impl SubmissionPort<OngProfileField> for OngProfileSubmission {
    async fn submit(&self, draft: &Draft<OngProfileField>) -> Result<SubmissionReceipt, ApiError> {
        let (update, logo) = ong_profile::to_update(draft)?;
        let profile = self.profiles.update_ong_profile(update, logo).await?;
        Ok(SubmissionReceipt::for_resource(
            profile.id.into_inner(),
            "Perfil da ONG atualizado.",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::mocks::{MockAnimals, MockAuth};
    use bc_core::ids::{OngId, UserId};
    use bc_core::models::{AccountKind, Animal, AnimalStatus, AuthUser, Sex, Size, Species};

    fn animal(id: &str) -> Animal {
        Animal {
            id: AnimalId::from_str(id),
            ong_id: OngId::from_str("o1"),
            name: "Rex".into(),
            species: Species::Dog,
            breed: "SRD".into(),
            sex: Sex::Male,
            size: Size::Medium,
            age_years: 2,
            vaccinated: false,
            vaccines: vec![],
            neutered: true,
            special_needs: false,
            special_needs_description: None,
            description: "Companheiro para todas as horas.".into(),
            photo_urls: vec!["https://cdn/rex.jpg".into()],
            status: AnimalStatus::Available,
            created_at: chrono::Utc::now(),
        }
    }

    #[tokio::test]
    async fn update_adapter_targets_existing_animal() {
        let mut animals = MockAnimals::new();
        animals.expect_create().never();
        animals
            .expect_update()
            .withf(|id, payload, photos| {
                id.as_str() == "a1" && payload.keep_photo_urls.len() == 1 && photos.is_empty()
            })
            .times(1)
            .returning(|_, _, _| Ok(animal("a1")));

        let adapter = AnimalSubmission::update(Arc::new(animals), AnimalId::from_str("a1"));
        let draft = animal_form::seed_from(&animal("a1"));
        let receipt = adapter.submit(&draft).await.unwrap();
        assert_eq!(receipt.resource_id.as_deref(), Some("a1"));
    }

    #[tokio::test]
    async fn incomplete_draft_is_an_invalid_payload() {
        let mut animals = MockAnimals::new();
        animals.expect_create().never();
        let adapter = AnimalSubmission::create(Arc::new(animals));

        let err = adapter.submit(&Draft::new()).await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidPayload(_)));
    }

    #[tokio::test]
    async fn signup_logs_the_new_account_in() {
        let mut auth = MockAuth::new();
        auth.expect_signup_user().times(1).returning(|signup| {
            Ok(AuthUser {
                id: UserId::from_str("u9"),
                name: signup.name,
                email: signup.email,
                kind: AccountKind::Adopter,
                ong_id: None,
            })
        });
        let auth: Arc<dyn AuthPort> = Arc::new(auth);
        let session = SessionContext::new(auth.clone()).arc();
        let adapter = UserSignupSubmission::new(auth, session.clone());

        let draft = Draft::new()
            .with(UserSignupField::Name, "João Silva")
            .with(UserSignupField::Email, "joao@example.com")
            .with(UserSignupField::Cpf, "390.533.447-05")
            .with(UserSignupField::Phone, "11987654321")
            .with(UserSignupField::Password, "abc123");
        adapter.submit(&draft).await.unwrap();

        let user = session.current_user().await.unwrap();
        assert_eq!(user.id.as_str(), "u9");
    }
}
