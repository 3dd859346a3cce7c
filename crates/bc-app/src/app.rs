use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use bc_core::config::AppConfig;
use bc_core::error::{ApiError, ErrorMessages};
use bc_core::flows::animal_form::{self, AnimalField};
use bc_core::flows::ong_signup::{self, OngSignupField};
use bc_core::flows::user_signup::{self, UserSignupField};
use bc_core::form::Draft;
use bc_core::ids::{AnimalId, OngId};
use bc_core::ports::{AnimalPort, AuthPort};

use crate::usecases::submission::{AnimalSubmission, OngSignupSubmission, UserSignupSubmission};
use crate::usecases::{
    build_wizard, AdoptionProcesses, AnimalFeed, AppError, Donations, Favorites, LookupAutofill,
    Profiles, SessionContext, WizardOrchestrator,
};
use crate::AppDeps;

/// Tunables taken from the configuration file.
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub page_size: u32,
    pub lookup_debounce: Duration,
    pub messages: ErrorMessages,
}

impl From<&AppConfig> for AppSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            page_size: config.feed.page_size,
            lookup_debounce: Duration::from_millis(config.lookup.debounce_ms),
            messages: ErrorMessages::default(),
        }
    }
}

/// The application runtime: use cases wired to their ports.
pub struct App {
    auth: Arc<dyn AuthPort>,
    animals: Arc<dyn AnimalPort>,
    messages: ErrorMessages,

    pub session: Arc<SessionContext>,
    pub feed: AnimalFeed,
    pub favorites: Favorites,
    pub adoptions: AdoptionProcesses,
    pub donations: Donations,
    pub profiles: Profiles,
    pub lookup: LookupAutofill,
}

impl App {
    /// This constructor signature is the dependency manifest.
    pub fn new(deps: AppDeps, settings: AppSettings) -> Self {
        let session = SessionContext::new(deps.auth.clone()).arc();
        Self {
            feed: AnimalFeed::new(deps.animals.clone(), settings.page_size),
            favorites: Favorites::new(deps.favorites),
            adoptions: AdoptionProcesses::new(deps.adoptions, session.clone()),
            donations: Donations::new(deps.donations),
            profiles: Profiles::new(
                deps.profiles,
                deps.animals.clone(),
                session.clone(),
                settings.messages.clone(),
            ),
            lookup: LookupAutofill::new(deps.lookup, settings.lookup_debounce),
            session,
            auth: deps.auth,
            animals: deps.animals,
            messages: settings.messages,
        }
    }

    pub fn user_signup_wizard(&self) -> Result<WizardOrchestrator<UserSignupField>, AppError> {
        Ok(build_wizard(
            "user_signup",
            &user_signup::STEPS,
            Draft::new(),
            Arc::new(UserSignupSubmission::new(
                self.auth.clone(),
                self.session.clone(),
            )),
            self.messages.clone(),
        )?)
    }

    pub fn ong_signup_wizard(&self) -> Result<WizardOrchestrator<OngSignupField>, AppError> {
        let messages = self
            .messages
            .clone()
            .with_override(409, "Já existe uma ONG cadastrada com este e-mail ou CNPJ.");
        Ok(build_wizard(
            "ong_signup",
            &ong_signup::STEPS,
            Draft::new(),
            Arc::new(OngSignupSubmission::new(
                self.auth.clone(),
                self.session.clone(),
            )),
            messages,
        )?)
    }

    /// Listing form for the logged-in shelter.
    pub async fn new_animal_wizard(&self) -> Result<WizardOrchestrator<AnimalField>, AppError> {
        self.require_ong().await?;
        Ok(build_wizard(
            "animal_create",
            &animal_form::STEPS,
            Draft::new(),
            Arc::new(AnimalSubmission::create(self.animals.clone())),
            self.messages.clone(),
        )?)
    }

    /// Edit form seeded from the stored animal. Shelters can only edit their
    /// own listings.
    pub async fn edit_animal_wizard(
        &self,
        id: &AnimalId,
    ) -> Result<WizardOrchestrator<AnimalField>, AppError> {
        let ong_id = self.require_ong().await?;
        let animal = self.animals.get(id).await?;
        if animal.ong_id != ong_id {
            return Err(ApiError::status(403).into());
        }
        info!(animal = %id, "editing animal");
        Ok(build_wizard(
            "animal_update",
            &animal_form::STEPS,
            animal_form::seed_from(&animal),
            Arc::new(AnimalSubmission::update(self.animals.clone(), id.clone())),
            self.messages.clone(),
        )?)
    }

    async fn require_ong(&self) -> Result<OngId, ApiError> {
        self.session.require_user().await?;
        self.session.ong_id().await.ok_or_else(|| ApiError::status(403))
    }
}
