//! CRUD for allocation types and their scoped reference collections.

use axum::{
    Router,
    extract::{Path, State},
    response::Json as ResponseJson,
    routing::get,
};
use db::models::allocation_type::{
    AllocationType, AllocationTypeWithLinks, CreateAllocationType,
};
use utils::response::ApiResponse;
use uuid::Uuid;

use crate::{AppState, error::ApiError};

pub async fn list_allocation_types(
    State(state): State<AppState>,
) -> Result<ResponseJson<ApiResponse<Vec<AllocationTypeWithLinks>>>, ApiError> {
    let allocation_types = AllocationType::find_all_with_links(&state.db().pool).await?;
    Ok(ResponseJson(ApiResponse::success(allocation_types)))
}

pub async fn get_allocation_type(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<AllocationType>>, ApiError> {
    let allocation_type = AllocationType::find_by_id(&state.db().pool, id)
        .await?
        .ok_or(ApiError::NotFound("allocation type"))?;
    Ok(ResponseJson(ApiResponse::success(allocation_type)))
}

pub async fn create_allocation_type(
    State(state): State<AppState>,
    axum::Json(payload): axum::Json<CreateAllocationType>,
) -> Result<ResponseJson<ApiResponse<AllocationType>>, ApiError> {
    if payload.name.trim().is_empty() {
        return Err(ApiError::Validation("name must not be empty".to_string()));
    }
    let allocation_type =
        AllocationType::create(&state.db().pool, &payload, Uuid::new_v4()).await?;
    Ok(ResponseJson(ApiResponse::success_with_message(
        allocation_type,
        "Allocation type saved successfully",
    )))
}

pub async fn update_allocation_type(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    axum::Json(payload): axum::Json<CreateAllocationType>,
) -> Result<ResponseJson<ApiResponse<AllocationType>>, ApiError> {
    AllocationType::find_by_id(&state.db().pool, id)
        .await?
        .ok_or(ApiError::NotFound("allocation type"))?;
    let allocation_type = AllocationType::update(&state.db().pool, id, &payload).await?;
    Ok(ResponseJson(ApiResponse::success(allocation_type)))
}

pub async fn delete_allocation_type(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    let deleted = AllocationType::delete(&state.db().pool, id).await?;
    if deleted == 0 {
        return Err(ApiError::NotFound("allocation type"));
    }
    Ok(ResponseJson(ApiResponse::success(())))
}

pub fn router() -> Router<AppState> {
    Router::new().nest(
        "/allocation-types",
        Router::new()
            .route("/", get(list_allocation_types).post(create_allocation_type))
            .route(
                "/{id}",
                get(get_allocation_type)
                    .put(update_allocation_type)
                    .delete(delete_allocation_type),
            ),
    )
}
