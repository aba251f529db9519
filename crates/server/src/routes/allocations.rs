//! CRUD for allocation (distribution) records.

use axum::{
    Router,
    extract::{Path, State},
    response::Json as ResponseJson,
    routing::get,
};
use db::models::allocation::{Allocation, AllocationWithNames, CreateAllocation};
use utils::response::ApiResponse;
use uuid::Uuid;

use crate::{AppState, error::ApiError};

pub async fn list_allocations(
    State(state): State<AppState>,
) -> Result<ResponseJson<ApiResponse<Vec<AllocationWithNames>>>, ApiError> {
    let allocations = Allocation::find_all_with_names(&state.db().pool).await?;
    Ok(ResponseJson(ApiResponse::success(allocations)))
}

pub async fn get_allocation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<Allocation>>, ApiError> {
    let allocation = Allocation::find_by_id(&state.db().pool, id)
        .await?
        .ok_or(ApiError::NotFound("allocation"))?;
    Ok(ResponseJson(ApiResponse::success(allocation)))
}

pub async fn create_allocation(
    State(state): State<AppState>,
    axum::Json(payload): axum::Json<CreateAllocation>,
) -> Result<ResponseJson<ApiResponse<Allocation>>, ApiError> {
    if payload.received.unwrap_or(false) && payload.date_received.is_none() {
        return Err(ApiError::Validation(
            "date_received is required once marked received".to_string(),
        ));
    }
    let allocation = Allocation::create(&state.db().pool, &payload, Uuid::new_v4()).await?;
    Ok(ResponseJson(ApiResponse::success(allocation)))
}

pub async fn update_allocation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    axum::Json(payload): axum::Json<CreateAllocation>,
) -> Result<ResponseJson<ApiResponse<Allocation>>, ApiError> {
    if payload.received.unwrap_or(false) && payload.date_received.is_none() {
        return Err(ApiError::Validation(
            "date_received is required once marked received".to_string(),
        ));
    }
    Allocation::find_by_id(&state.db().pool, id)
        .await?
        .ok_or(ApiError::NotFound("allocation"))?;
    let allocation = Allocation::update(&state.db().pool, id, &payload).await?;
    Ok(ResponseJson(ApiResponse::success(allocation)))
}

pub async fn delete_allocation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    let deleted = Allocation::delete(&state.db().pool, id).await?;
    if deleted == 0 {
        return Err(ApiError::NotFound("allocation"));
    }
    Ok(ResponseJson(ApiResponse::success(())))
}

pub fn router() -> Router<AppState> {
    Router::new().nest(
        "/allocations",
        Router::new()
            .route("/", get(list_allocations).post(create_allocation))
            .route(
                "/{id}",
                get(get_allocation)
                    .put(update_allocation)
                    .delete(delete_allocation),
            ),
    )
}
