//! Request handlers: translate HTTP into [`UserStore`] calls and back.
//!
//! [`UserStore`]: crate::store::UserStore

use std::collections::HashMap;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use super::AppState;
use super::error::{ApiError, Message};
use super::form::UserForm;
use crate::constants::{MSG_DELETED, MSG_ROOT};
use crate::models::User;

pub async fn root() -> &'static str {
    MSG_ROOT
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<User>, ApiError> {
    Ok(Json(state.store.get(&id)?))
}

pub async fn get_user_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<User>, ApiError> {
    Ok(Json(state.store.get_by_name(&name)?))
}

pub async fn create_user(
    State(state): State<AppState>,
    UserForm(fields): UserForm,
) -> (StatusCode, Json<User>) {
    (StatusCode::CREATED, Json(state.store.create(fields)))
}

/// Every record, as a JSON object keyed by id.
pub async fn get_all_users(State(state): State<AppState>) -> Json<HashMap<String, User>> {
    Json(state.store.get_all())
}

/// `PUT`: overwrite both fields, blanks included.
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    UserForm(fields): UserForm,
) -> Result<Json<User>, ApiError> {
    Ok(Json(state.store.replace_fields(&id, fields)?))
}

/// `PATCH`: overwrite only the fields that were supplied non-empty.
pub async fn patch_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    UserForm(fields): UserForm,
) -> Result<Json<User>, ApiError> {
    Ok(Json(state.store.merge_fields(&id, fields)?))
}

pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Message>, ApiError> {
    state.store.delete(&id)?;
    Ok(Json(Message::new(MSG_DELETED)))
}
