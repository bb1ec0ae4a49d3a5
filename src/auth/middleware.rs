use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::headers::{authorization::Bearer, Authorization, HeaderMapExt};

use crate::auth::provider::AuthError;
use crate::error::AppError;
use crate::AppState;

/// The caller resolved by the credential gate.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Opaque provider-issued identifier; namespaces every storage key.
    pub id: String,
}

/// Credential gate: rejects before any handler (and so any storage access)
/// runs. No result is cached between requests.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let bearer = req.headers().typed_get::<Authorization<Bearer>>();
    let resolved = match bearer {
        Some(auth) => state.identity.verify(auth.token()).await,
        None => Err(AuthError::MissingToken),
    };

    let user_id = resolved.map_err(|e| {
        tracing::debug!(reason = %e, path = %req.uri().path(), "Credential rejected");
        AppError::Unauthorized
    })?;

    req.extensions_mut().insert(AuthUser { id: user_id });
    Ok(next.run(req).await)
}
