use async_trait::async_trait;

use crate::error::ApiError;
use crate::form::FileRef;
use crate::ids::OngId;
use crate::models::{OngProfile, OngProfileUpdate, UserProfile, UserProfileUpdate};

#[async_trait]
pub trait ProfilePort: Send + Sync {
    async fn my_profile(&self) -> Result<UserProfile, ApiError>;

    async fn update_my_profile(&self, update: UserProfileUpdate)
        -> Result<UserProfile, ApiError>;

    async fn ong_profile(&self, id: &OngId) -> Result<OngProfile, ApiError>;

    /// Updates the shelter owned by the logged-in account.
    async fn update_ong_profile(
        &self,
        update: OngProfileUpdate,
        logo: Option<FileRef>,
    ) -> Result<OngProfile, ApiError>;
}
