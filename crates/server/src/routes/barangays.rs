//! CRUD for barangay reference data.

use axum::{
    Router,
    extract::{Path, State},
    response::Json as ResponseJson,
    routing::get,
};
use db::models::barangay::{Barangay, CreateBarangay};
use utils::response::ApiResponse;
use uuid::Uuid;

use crate::{AppState, error::ApiError};

pub async fn list_barangays(
    State(state): State<AppState>,
) -> Result<ResponseJson<ApiResponse<Vec<Barangay>>>, ApiError> {
    let barangays = Barangay::find_all(&state.db().pool).await?;
    Ok(ResponseJson(ApiResponse::success(barangays)))
}

pub async fn get_barangay(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<Barangay>>, ApiError> {
    let barangay = Barangay::find_by_id(&state.db().pool, id)
        .await?
        .ok_or(ApiError::NotFound("barangay"))?;
    Ok(ResponseJson(ApiResponse::success(barangay)))
}

pub async fn create_barangay(
    State(state): State<AppState>,
    axum::Json(payload): axum::Json<CreateBarangay>,
) -> Result<ResponseJson<ApiResponse<Barangay>>, ApiError> {
    if payload.name.trim().is_empty() {
        return Err(ApiError::Validation("name must not be empty".to_string()));
    }
    let barangay = Barangay::create(&state.db().pool, &payload, Uuid::new_v4()).await?;
    Ok(ResponseJson(ApiResponse::success(barangay)))
}

pub async fn update_barangay(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    axum::Json(payload): axum::Json<CreateBarangay>,
) -> Result<ResponseJson<ApiResponse<Barangay>>, ApiError> {
    if payload.name.trim().is_empty() {
        return Err(ApiError::Validation("name must not be empty".to_string()));
    }
    Barangay::find_by_id(&state.db().pool, id)
        .await?
        .ok_or(ApiError::NotFound("barangay"))?;
    let barangay = Barangay::update(&state.db().pool, id, &payload.name).await?;
    Ok(ResponseJson(ApiResponse::success(barangay)))
}

pub async fn delete_barangay(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    let deleted = Barangay::delete(&state.db().pool, id).await?;
    if deleted == 0 {
        return Err(ApiError::NotFound("barangay"));
    }
    Ok(ResponseJson(ApiResponse::success(())))
}

pub fn router() -> Router<AppState> {
    Router::new().nest(
        "/barangays",
        Router::new()
            .route("/", get(list_barangays).post(create_barangay))
            .route(
                "/{id}",
                get(get_barangay).put(update_barangay).delete(delete_barangay),
            ),
    )
}
