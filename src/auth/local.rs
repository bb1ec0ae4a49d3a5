//! Self-hosted identity provider: argon2 password hashes kept in the KV store,
//! HS256 access tokens.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::jwt::{create_access_token, verify_token};
use crate::auth::password::{hash_password, verify_password};
use crate::auth::provider::{AuthError, IdentityProvider, NewUser, ProviderError, Session};
use crate::db::KvStore;
use crate::models::{user::UserMetadata, IdentityUser};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredUser {
    id: String,
    email: String,
    password_hash: String,
    name: String,
    created_at: DateTime<Utc>,
}

impl From<StoredUser> for IdentityUser {
    fn from(user: StoredUser) -> Self {
        IdentityUser {
            id: user.id,
            email: Some(user.email),
            user_metadata: UserMetadata {
                name: Some(user.name),
            },
            created_at: Some(user.created_at),
        }
    }
}

pub struct LocalIdentity {
    store: Arc<dyn KvStore>,
    jwt_secret: String,
    access_ttl_secs: i64,
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn user_key(email: &str) -> String {
    format!("auth_users:{}", email)
}

fn user_id_key(id: &str) -> String {
    format!("auth_user_ids:{}", id)
}

fn unavailable(e: impl Into<anyhow::Error>) -> ProviderError {
    ProviderError::Unavailable(e.into())
}

impl LocalIdentity {
    pub fn new(store: Arc<dyn KvStore>, jwt_secret: String, access_ttl_secs: i64) -> Self {
        Self {
            store,
            jwt_secret,
            access_ttl_secs,
        }
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<StoredUser>, ProviderError> {
        match self.store.get(&user_key(email)).await.map_err(unavailable)? {
            Some(value) => serde_json::from_value(value).map(Some).map_err(unavailable),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl IdentityProvider for LocalIdentity {
    async fn verify(&self, token: &str) -> Result<String, AuthError> {
        verify_token(token, &self.jwt_secret).map(|claims| claims.sub)
    }

    async fn create_user(&self, user: NewUser) -> Result<IdentityUser, ProviderError> {
        let email = normalize_email(&user.email);
        // Check-then-insert; two simultaneous signups for one email can both pass.
        if self.find_by_email(&email).await?.is_some() {
            return Err(ProviderError::Rejected(
                "A user with this email address has already been registered".into(),
            ));
        }

        let password_hash =
            hash_password(&user.password).map_err(|e| unavailable(anyhow::anyhow!("{}", e)))?;
        let stored = StoredUser {
            id: Uuid::new_v4().to_string(),
            email: email.clone(),
            password_hash,
            name: user.name,
            created_at: Utc::now(),
        };

        let value = serde_json::to_value(&stored).map_err(unavailable)?;
        self.store
            .set(&user_key(&email), value)
            .await
            .map_err(unavailable)?;
        self.store
            .set(&user_id_key(&stored.id), serde_json::Value::String(email))
            .await
            .map_err(unavailable)?;

        tracing::info!(user_id = %stored.id, "User registered");
        Ok(stored.into())
    }

    async fn get_user(&self, user_id: &str) -> Result<IdentityUser, ProviderError> {
        let email = self
            .store
            .get(&user_id_key(user_id))
            .await
            .map_err(unavailable)?
            .and_then(|v| v.as_str().map(str::to_owned))
            .ok_or_else(|| ProviderError::Rejected("User not found".into()))?;

        self.find_by_email(&email)
            .await?
            .map(IdentityUser::from)
            .ok_or_else(|| ProviderError::Rejected("User not found".into()))
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, ProviderError> {
        let invalid = || ProviderError::Rejected("Invalid login credentials".into());

        let user = self
            .find_by_email(&normalize_email(email))
            .await?
            .ok_or_else(invalid)?;
        if !verify_password(password, &user.password_hash) {
            return Err(invalid());
        }

        let access_token =
            create_access_token(&user.id, &user.email, &self.jwt_secret, self.access_ttl_secs)
                .map_err(unavailable)?;

        Ok(Session {
            access_token,
            token_type: "bearer".into(),
            expires_in: self.access_ttl_secs,
            user: user.into(),
        })
    }
}
