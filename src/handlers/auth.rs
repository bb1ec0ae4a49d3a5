use axum::{extract::State, Extension, Json};
use validator::Validate;

use crate::auth::{AuthUser, NewUser, Session};
use crate::dto::{LoginRequest, SignupRequest, UserResponse};
use crate::error::AppResult;
use crate::extract::AppJson;
use crate::AppState;

pub async fn signup(
    State(state): State<AppState>,
    AppJson(body): AppJson<SignupRequest>,
) -> AppResult<Json<UserResponse>> {
    body.validate()?;

    let user = state
        .identity
        .create_user(NewUser {
            email: body.email,
            password: body.password,
            name: body.name,
        })
        .await
        .map_err(|e| {
            tracing::info!(error = %e, "Signup failed");
            e
        })?;

    Ok(Json(UserResponse { user }))
}

pub async fn login(
    State(state): State<AppState>,
    AppJson(body): AppJson<LoginRequest>,
) -> AppResult<Json<Session>> {
    body.validate()?;

    let session = state.identity.sign_in(&body.email, &body.password).await?;
    Ok(Json(session))
}

/// The user behind the presented token, as the provider currently knows it.
pub async fn me(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<UserResponse>> {
    let user = state.identity.get_user(&auth_user.id).await?;
    Ok(Json(UserResponse { user }))
}
