//! Profile pages and seeded profile edit wizards.

use std::sync::Arc;

use tracing::info;

use bc_core::error::{ApiError, ErrorMessages};
use bc_core::flows::ong_profile::{self, OngProfileField};
use bc_core::flows::user_profile::{self, UserProfileField};
use bc_core::ids::OngId;
use bc_core::models::{AnimalSummary, OngProfile, UserProfile};
use bc_core::ports::{AnimalPort, ProfilePort};

use super::session::SessionContext;
use super::submission::{OngProfileSubmission, UserProfileSubmission};
use super::wizard::{build_wizard, WizardOrchestrator};
use super::AppError;

/// Public shelter page: profile plus listed animals.
#[derive(Debug, Clone, PartialEq)]
pub struct OngPage {
    pub profile: OngProfile,
    pub animals: Vec<AnimalSummary>,
}

pub struct Profiles {
    profiles: Arc<dyn ProfilePort>,
    animals: Arc<dyn AnimalPort>,
    session: Arc<SessionContext>,
    messages: ErrorMessages,
}

impl Profiles {
    pub fn new(
        profiles: Arc<dyn ProfilePort>,
        animals: Arc<dyn AnimalPort>,
        session: Arc<SessionContext>,
        messages: ErrorMessages,
    ) -> Self {
        Self {
            profiles,
            animals,
            session,
            messages,
        }
    }

    pub async fn my_profile(&self) -> Result<UserProfile, ApiError> {
        self.session.require_user().await?;
        self.profiles.my_profile().await
    }

    pub async fn ong_page(&self, id: &OngId) -> Result<OngPage, ApiError> {
        let (profile, animals) = futures::try_join!(
            self.profiles.ong_profile(id),
            self.animals.list_by_ong(id)
        )?;
        Ok(OngPage { profile, animals })
    }

    pub async fn edit_my_profile(&self) -> Result<WizardOrchestrator<UserProfileField>, AppError> {
        let profile = self.my_profile().await?;
        info!(user = %profile.id, "editing adopter profile");
        Ok(build_wizard(
            "user_profile",
            &user_profile::STEPS,
            user_profile::seed_from(&profile),
            Arc::new(UserProfileSubmission::new(self.profiles.clone())),
            self.messages.clone(),
        )?)
    }

    /// Only shelter accounts own an ONG profile; others get a 403.
    pub async fn edit_ong_profile(&self) -> Result<WizardOrchestrator<OngProfileField>, AppError> {
        self.session.require_user().await?;
        let ong_id = self
            .session
            .ong_id()
            .await
            .ok_or_else(|| ApiError::status(403))?;
        let profile = self.profiles.ong_profile(&ong_id).await?;
        info!(ong = %ong_id, "editing shelter profile");
        Ok(build_wizard(
            "ong_profile",
            &ong_profile::STEPS,
            ong_profile::seed_from(&profile),
            Arc::new(OngProfileSubmission::new(self.profiles.clone())),
            self.messages.clone(),
        )?)
    }
}
