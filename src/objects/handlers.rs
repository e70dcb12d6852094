use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use serde_json::Value;
use tracing::instrument;

use crate::{
    auth::extractors::{AuthUser, Superuser},
    error::ApiError,
    state::AppState,
};

use super::dto::{CreatedObjectEcho, StubMessage};
use super::repo::Object;

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/objects", get(list_objects))
        .route("/objects/:id", get(get_object))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/objects", post(create_object))
        .route("/objects/:id", put(update_object).delete(delete_object))
}

#[instrument(skip(state))]
async fn list_objects(State(state): State<AppState>) -> Result<Json<Vec<Object>>, ApiError> {
    let all_objects = state.objects.list().await?;
    if all_objects.is_empty() {
        return Err(ApiError::NotFound("Список объектов пуст!".into()));
    }
    Ok(Json(all_objects))
}

// Заглушка: объект пока никуда не сохраняется, тело возвращается как есть.
#[instrument(skip(_caller, payload))]
async fn create_object(
    _caller: AuthUser,
    Json(payload): Json<Value>,
) -> (StatusCode, Json<CreatedObjectEcho>) {
    (
        StatusCode::CREATED,
        Json(CreatedObjectEcho {
            message: "Объект создан".into(),
            object: payload,
        }),
    )
}

#[instrument]
async fn get_object(Path(id): Path<i32>) -> Json<StubMessage> {
    Json(StubMessage {
        message: format!("Объект {id} извлечён из БД."),
    })
}

#[instrument(skip(_caller, _payload))]
async fn update_object(
    _caller: Superuser,
    Path(id): Path<i32>,
    Json(_payload): Json<Value>,
) -> Json<StubMessage> {
    Json(StubMessage {
        message: format!("Объект {id} обновлён в БД."),
    })
}

#[instrument(skip(_caller))]
async fn delete_object(_caller: Superuser, Path(_id): Path<i32>) -> StatusCode {
    StatusCode::NO_CONTENT
}
