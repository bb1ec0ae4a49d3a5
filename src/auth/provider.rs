//! The identity provider seam behind the credential gate and the auth routes.

use async_trait::async_trait;
use serde::Serialize;

use crate::models::IdentityUser;

/// Why a bearer credential was refused. Both variants surface as the same
/// generic 401; the distinction exists for logs only.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("no access token provided")]
    MissingToken,

    #[error("invalid or expired token: {0}")]
    InvalidToken(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// The provider answered and said no; the message is safe to show.
    #[error("{0}")]
    Rejected(String),

    /// The provider could not be reached or answered nonsense.
    #[error("identity provider unavailable: {0}")]
    Unavailable(#[source] anyhow::Error),
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: IdentityUser,
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Resolve a bearer token to the user id it was issued for.
    async fn verify(&self, token: &str) -> Result<String, AuthError>;

    /// Register a user; the account is usable immediately.
    async fn create_user(&self, user: NewUser) -> Result<IdentityUser, ProviderError>;

    async fn get_user(&self, user_id: &str) -> Result<IdentityUser, ProviderError>;

    /// Exchange email and password for an access token.
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, ProviderError>;
}
