//! Accounts, sessions and profiles.

use serde::{Deserialize, Serialize};

use crate::ids::{OngId, UserId};

use super::Address;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountKind {
    Adopter,
    Ong,
}

/// Authenticated principal returned by login and session checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub kind: AccountKind,
    /// Set for shelter accounts.
    #[serde(default)]
    pub ong_id: Option<OngId>,
}

impl AuthUser {
    pub fn is_ong(&self) -> bool {
        self.kind == AccountKind::Ong
    }
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfileUpdate {
    pub name: String,
    pub phone: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub bio: Option<String>,
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSignup {
    pub name: String,
    pub email: String,
    pub cpf: String,
    pub phone: String,
    pub password: String,
}

impl std::fmt::Debug for UserSignup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserSignup")
            .field("name", &self.name)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Public shelter profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OngProfile {
    pub id: OngId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub description: Option<String>,
    pub cnpj: Option<String>,
    pub address: Address,
    pub logo_url: Option<String>,
    #[serde(default)]
    pub animals_count: u32,
}

/// Structured part of an ONG profile update; the logo travels separately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OngProfileUpdate {
    pub name: String,
    pub phone: String,
    pub description: Option<String>,
    pub address: Address,
}

/// Structured part of an ONG signup; the logo travels separately.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OngSignup {
    pub responsible_name: String,
    pub email: String,
    pub password: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cnpj: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responsible_cpf: Option<String>,
    pub phone: String,
    pub description: Option<String>,
    pub address: Address,
}

impl std::fmt::Debug for OngSignup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OngSignup")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("cnpj", &self.cnpj)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_debug_masks_password() {
        let credentials = Credentials {
            email: "ana@abrigo.org".into(),
            password: "segredo".into(),
        };
        assert!(!format!("{credentials:?}").contains("segredo"));
    }

    #[test]
    fn auth_user_defaults_missing_ong_id() {
        let user: AuthUser = serde_json::from_str(
            r#"{"id":"u1","name":"Ana","email":"ana@x.org","kind":"adopter"}"#,
        )
        .unwrap();
        assert_eq!(user.ong_id, None);
        assert!(!user.is_ong());
    }
}
