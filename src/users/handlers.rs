use axum::{
    extract::{Path, State},
    routing::{get, patch},
    Json, Router,
};
use tracing::{info, instrument};

use crate::{
    auth::extractors::{AuthUser, Superuser},
    auth::handlers::name_in_bounds,
    auth::password::hash_password,
    error::ApiError,
    state::AppState,
};

use super::dto::{DeactivatedResponse, UserRead, UserUpdateRequest};
use super::repo::UserChanges;
use super::services;

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users))
        .route("/users/me", get(get_me))
        .route("/users/:id", get(get_user))
}

pub fn write_routes() -> Router<AppState> {
    Router::new().route("/users/:id", patch(update_user).delete(delete_user))
}

#[instrument(skip(state, _caller))]
async fn list_users(
    State(state): State<AppState>,
    _caller: AuthUser,
) -> Result<Json<Vec<UserRead>>, ApiError> {
    let users = services::list_users(state.users.as_ref()).await?;
    Ok(Json(users.into_iter().map(UserRead::from).collect()))
}

#[instrument(skip(caller))]
async fn get_me(AuthUser(caller): AuthUser) -> Json<UserRead> {
    Json(UserRead::from(caller))
}

#[instrument(skip(state, _caller))]
async fn get_user(
    State(state): State<AppState>,
    _caller: Superuser,
    Path(id): Path<i32>,
) -> Result<Json<UserRead>, ApiError> {
    let user = services::get_user(state.users.as_ref(), id).await?;
    Ok(Json(user.into()))
}

#[instrument(skip(state, _caller, payload))]
async fn update_user(
    State(state): State<AppState>,
    _caller: Superuser,
    Path(id): Path<i32>,
    Json(payload): Json<UserUpdateRequest>,
) -> Result<Json<UserRead>, ApiError> {
    for value in [&payload.firstname, &payload.surname, &payload.patronymic]
        .into_iter()
        .flatten()
    {
        if !name_in_bounds(value) {
            return Err(ApiError::Validation(
                "Name fields must be 2-254 characters".into(),
            ));
        }
    }
    let hashed_password = match payload.password.as_deref() {
        Some(p) if p.len() < 8 => return Err(ApiError::Validation("Password too short".into())),
        Some(p) => Some(hash_password(p)?),
        None => None,
    };

    let changes = UserChanges {
        hashed_password,
        firstname: payload.firstname,
        surname: payload.surname,
        patronymic: payload.patronymic,
        is_active: None,
    };
    let user = services::update_user(state.users.as_ref(), id, changes).await?;
    info!(user_id = user.id, "user updated");
    Ok(Json(user.into()))
}

#[instrument(skip(state, _caller))]
async fn delete_user(
    State(state): State<AppState>,
    _caller: Superuser,
    Path(id): Path<i32>,
) -> Result<Json<DeactivatedResponse>, ApiError> {
    let user = services::deactivate_user(state.users.as_ref(), id).await?;
    info!(user_id = user.id, "user deactivated");
    Ok(Json(DeactivatedResponse {
        message: format!("Пользователь с id={id} деактивирован"),
    }))
}
