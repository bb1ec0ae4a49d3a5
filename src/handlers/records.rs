//! List/create/update/delete for any per-user collection.
//!
//! Routed once per category with a turbofish, e.g. `list::<Task>`. Update and
//! delete only exist for `Identified` records, so moods cannot be routed to them.

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::auth::AuthUser;
use crate::dto::SuccessResponse;
use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::models::{Identified, Record};
use crate::services::Collection;
use crate::AppState;

/// `{ "<key>": value }`
fn envelope(key: &str, value: impl Serialize) -> AppResult<Json<Value>> {
    let value = serde_json::to_value(value).map_err(|e| AppError::Internal(e.into()))?;
    let mut body = Map::new();
    body.insert(key.to_string(), value);
    Ok(Json(Value::Object(body)))
}

pub async fn list<R: Record>(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<Value>> {
    let records = Collection::<R>::new(state.store.clone(), &auth_user.id)
        .list()
        .await?;

    envelope(R::CATEGORY.as_str(), records)
}

pub async fn create<R: Record>(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    AppJson(record): AppJson<R>,
) -> AppResult<Json<Value>> {
    let record = Collection::<R>::new(state.store.clone(), &auth_user.id)
        .create(record)
        .await?;

    envelope(R::SINGULAR, record)
}

pub async fn update<R: Identified>(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<String>,
    AppJson(replacement): AppJson<R>,
) -> AppResult<Json<Value>> {
    let record = Collection::<R>::new(state.store.clone(), &auth_user.id)
        .update(&id, replacement)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("{} not found", R::LABEL)))?;

    envelope(R::SINGULAR, record)
}

pub async fn delete<R: Identified>(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> AppResult<Json<SuccessResponse>> {
    Collection::<R>::new(state.store.clone(), &auth_user.id)
        .delete(&id)
        .await?;

    Ok(Json(SuccessResponse { success: true }))
}
