//! Explicit session/auth context.
//!
//! Populated by a session check at startup or by login/signup, cleared on
//! logout. Use cases that need the current account receive it as an
//! `Arc<SessionContext>`.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{info, warn};

use bc_core::error::ApiError;
use bc_core::flows::login::{self, LoginField};
use bc_core::form::{Draft, ValidationErrors};
use bc_core::ids::OngId;
use bc_core::models::AuthUser;
use bc_core::ports::AuthPort;

#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error("login form has {} invalid field(s)", .0.len())]
    Invalid(ValidationErrors<LoginField>),
    #[error(transparent)]
    Api(#[from] ApiError),
}

pub struct SessionContext {
    auth: Arc<dyn AuthPort>,
    user: RwLock<Option<AuthUser>>,
}

impl SessionContext {
    pub fn new(auth: Arc<dyn AuthPort>) -> Self {
        Self {
            auth,
            user: RwLock::new(None),
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// Ask the backend whether the session cookie is still valid.
    pub async fn restore(&self) -> Result<Option<AuthUser>, ApiError> {
        let user = self.auth.current_session().await?;
        match &user {
            Some(user) => info!(user = %user.id, kind = ?user.kind, "session restored"),
            None => info!("anonymous session"),
        }
        *self.user.write().await = user.clone();
        Ok(user)
    }

    pub async fn login(&self, draft: &Draft<LoginField>) -> Result<AuthUser, LoginError> {
        let errors = login::validate(draft);
        if !errors.is_empty() {
            return Err(LoginError::Invalid(errors));
        }
        let credentials = login::to_credentials(draft)?;
        let user = self.auth.login(credentials).await?;
        info!(user = %user.id, "logged in");
        self.set_user(user.clone()).await;
        Ok(user)
    }

    /// The local session is dropped even when the backend call fails.
    pub async fn logout(&self) -> Result<(), ApiError> {
        let result = self.auth.logout().await;
        if let Err(err) = &result {
            warn!(error = %err, "logout request failed; clearing local session anyway");
        }
        *self.user.write().await = None;
        result
    }

    pub(crate) async fn set_user(&self, user: AuthUser) {
        *self.user.write().await = Some(user);
    }

    pub async fn current_user(&self) -> Option<AuthUser> {
        self.user.read().await.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.user.read().await.is_some()
    }

    /// Shelter owned by the logged-in account, if any.
    pub async fn ong_id(&self) -> Option<OngId> {
        self.user
            .read()
            .await
            .as_ref()
            .filter(|user| user.is_ong())
            .and_then(|user| user.ong_id.clone())
    }

    /// Current user, or the 401 the backend would have answered.
    pub async fn require_user(&self) -> Result<AuthUser, ApiError> {
        self.current_user().await.ok_or_else(|| ApiError::status(401))
    }
}
