//! Request handlers for the `/users` resource.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use roster_core::{CreateRequest, Record, RecordId, UpdateRequest};
use serde::{Deserialize, Serialize};

use crate::envelope::ApiResponse;
use crate::error::ApiResult;
use crate::router::ApiState;

/// Query string accepted by `GET /users`.
#[derive(Debug, Default, Deserialize)]
pub struct FindUsersQuery {
    /// Case-insensitive name fragment.
    pub name: Option<String>,
}

/// Body of `GET /health`.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthStatus {
    /// Always `"ok"` while the process serves requests.
    pub status: String,
}

/// `POST /users`
pub async fn create_user(
    State(state): State<ApiState>,
    payload: Result<Json<CreateRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ApiResponse<Record>>)> {
    let Json(request) = payload?;
    let record = state.service.create(request).await;
    tracing::info!(id = record.id, "user created");
    Ok((StatusCode::CREATED, Json(ApiResponse::success(record))))
}

/// `GET /users?name=<part>`
pub async fn find_users(
    State(state): State<ApiState>,
    query: Result<Query<FindUsersQuery>, QueryRejection>,
) -> ApiResult<Json<ApiResponse<Vec<Record>>>> {
    let Query(query) = query?;
    let records = state.service.find_all(query.name.as_deref()).await;
    Ok(Json(ApiResponse::success(records)))
}

/// `GET /users/{id}`
///
/// An unknown id is not an error here: the envelope simply has no `data`.
/// Negative integers are accepted and name no record.
pub async fn find_user(
    State(state): State<ApiState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<ApiResponse<Record>>> {
    let record = match stored_id(id?) {
        Some(id) => state.service.find_by_id(id).await,
        None => None,
    };
    Ok(Json(ApiResponse::maybe(record)))
}

/// `GET /users/{id}/access`
pub async fn find_access(
    State(state): State<ApiState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<ApiResponse<u64>>> {
    let count = match stored_id(id?) {
        Some(id) => state.service.find_access(id).await,
        None => None,
    };
    Ok(Json(ApiResponse::maybe(count)))
}

/// Ids are never negative, so a negative route id matches nothing.
fn stored_id(Path(id): Path<i64>) -> Option<RecordId> {
    RecordId::try_from(id).ok()
}

/// `PATCH /users/{id}`
pub async fn update_user(
    State(state): State<ApiState>,
    id: Result<Path<RecordId>, PathRejection>,
    payload: Result<Json<UpdateRequest>, JsonRejection>,
) -> ApiResult<Json<ApiResponse<Record>>> {
    let Path(id) = id?;
    let Json(request) = payload?;
    let record = state.service.update(id, request).await?;
    tracing::info!(id, "user updated");
    Ok(Json(ApiResponse::success(record)))
}

/// `DELETE /users/{id}`
pub async fn remove_user(
    State(state): State<ApiState>,
    id: Result<Path<RecordId>, PathRejection>,
) -> ApiResult<Json<ApiResponse<()>>> {
    let Path(id) = id?;
    state.service.remove(id).await?;
    tracing::info!(id, "user removed");
    Ok(Json(ApiResponse::empty()))
}

/// `GET /health`
pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok".to_string(),
    })
}
