use async_trait::async_trait;

use crate::error::ApiError;
use crate::form::FileRef;
use crate::models::{AuthUser, Credentials, OngSignup, UserSignup};

/// Account creation and cookie session.
#[async_trait]
pub trait AuthPort: Send + Sync {
    async fn signup_user(&self, signup: UserSignup) -> Result<AuthUser, ApiError>;

    async fn signup_ong(&self, signup: OngSignup, logo: Option<FileRef>)
        -> Result<AuthUser, ApiError>;

    async fn login(&self, credentials: Credentials) -> Result<AuthUser, ApiError>;

    async fn logout(&self) -> Result<(), ApiError>;

    /// `Ok(None)` when the backend answers 401 (anonymous visitor).
    async fn current_session(&self) -> Result<Option<AuthUser>, ApiError>;
}
