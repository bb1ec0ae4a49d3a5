//! Supabase Auth (GoTrue) over its REST API.
//!
//! Token checks go through `/auth/v1/user` with the caller's token; user
//! administration uses the service-role key.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::json;

use crate::auth::provider::{AuthError, IdentityProvider, NewUser, ProviderError, Session};
use crate::models::IdentityUser;

pub struct SupabaseIdentity {
    client: Client,
    base_url: String,
    service_role_key: String,
}

/// GoTrue reports errors under different keys depending on the endpoint.
#[derive(Debug, Default, Deserialize)]
struct GoTrueError {
    msg: Option<String>,
    message: Option<String>,
    error_description: Option<String>,
    error: Option<String>,
}

impl GoTrueError {
    fn into_message(self, status: reqwest::StatusCode) -> String {
        self.msg
            .or(self.message)
            .or(self.error_description)
            .or(self.error)
            .unwrap_or_else(|| format!("Identity provider returned {}", status))
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_token_type")]
    token_type: String,
    #[serde(default)]
    expires_in: i64,
    user: IdentityUser,
}

fn default_token_type() -> String {
    "bearer".into()
}

impl SupabaseIdentity {
    pub fn new(base_url: &str, service_role_key: String) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            service_role_key,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/auth/v1{}", self.base_url, path)
    }

    fn admin(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("apikey", &self.service_role_key)
            .bearer_auth(&self.service_role_key)
    }

    /// Decode a success body, or turn an error status into `Rejected`.
    async fn read<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, ProviderError> {
        let status = response.status();
        if status.is_success() {
            return response
                .json::<T>()
                .await
                .map_err(|e| ProviderError::Unavailable(e.into()));
        }

        let body = response.json::<GoTrueError>().await.unwrap_or_default();
        if status.is_server_error() {
            return Err(ProviderError::Unavailable(anyhow::anyhow!(
                body.into_message(status)
            )));
        }
        Err(ProviderError::Rejected(body.into_message(status)))
    }

    async fn send<T: serde::de::DeserializeOwned>(
        builder: RequestBuilder,
    ) -> Result<T, ProviderError> {
        let response = builder
            .send()
            .await
            .map_err(|e| ProviderError::Unavailable(e.into()))?;
        Self::read(response).await
    }
}

#[async_trait]
impl IdentityProvider for SupabaseIdentity {
    async fn verify(&self, token: &str) -> Result<String, AuthError> {
        let request = self
            .client
            .get(self.url("/user"))
            .header("apikey", &self.service_role_key)
            .bearer_auth(token);

        Self::send::<IdentityUser>(request)
            .await
            .map(|user| user.id)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))
    }

    async fn create_user(&self, user: NewUser) -> Result<IdentityUser, ProviderError> {
        // No mail server is configured, so accounts are confirmed on creation.
        let request = self.admin(self.client.post(self.url("/admin/users"))).json(&json!({
            "email": user.email,
            "password": user.password,
            "user_metadata": { "name": user.name },
            "email_confirm": true,
        }));

        Self::send(request).await
    }

    async fn get_user(&self, user_id: &str) -> Result<IdentityUser, ProviderError> {
        let request = self.admin(self.client.get(self.url(&format!("/admin/users/{}", user_id))));

        Self::send(request).await
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, ProviderError> {
        let request = self
            .client
            .post(self.url("/token?grant_type=password"))
            .header("apikey", &self.service_role_key)
            .json(&json!({ "email": email, "password": password }));

        let token: TokenResponse = Self::send(request).await?;
        Ok(Session {
            access_token: token.access_token,
            token_type: token.token_type,
            expires_in: token.expires_in,
            user: token.user,
        })
    }
}
