//! CRUD for farm parcels.

use axum::{
    Router,
    extract::{Path, State},
    response::Json as ResponseJson,
    routing::get,
};
use db::models::farm::{CreateFarm, Farm};
use utils::response::ApiResponse;
use uuid::Uuid;

use crate::{AppState, error::ApiError};

pub async fn list_farms(
    State(state): State<AppState>,
) -> Result<ResponseJson<ApiResponse<Vec<Farm>>>, ApiError> {
    let farms = Farm::find_all(&state.db().pool).await?;
    Ok(ResponseJson(ApiResponse::success(farms)))
}

pub async fn get_farm(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<Farm>>, ApiError> {
    let farm = Farm::find_by_id(&state.db().pool, id)
        .await?
        .ok_or(ApiError::NotFound("farm"))?;
    Ok(ResponseJson(ApiResponse::success(farm)))
}

pub async fn create_farm(
    State(state): State<AppState>,
    axum::Json(payload): axum::Json<CreateFarm>,
) -> Result<ResponseJson<ApiResponse<Farm>>, ApiError> {
    if payload.ha < 0.0 {
        return Err(ApiError::Validation("ha must be non-negative".to_string()));
    }
    let farm = Farm::create(&state.db().pool, &payload, Uuid::new_v4()).await?;
    Ok(ResponseJson(ApiResponse::success(farm)))
}

pub async fn update_farm(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    axum::Json(payload): axum::Json<CreateFarm>,
) -> Result<ResponseJson<ApiResponse<Farm>>, ApiError> {
    if payload.ha < 0.0 {
        return Err(ApiError::Validation("ha must be non-negative".to_string()));
    }
    Farm::find_by_id(&state.db().pool, id)
        .await?
        .ok_or(ApiError::NotFound("farm"))?;
    let farm = Farm::update(&state.db().pool, id, &payload).await?;
    Ok(ResponseJson(ApiResponse::success(farm)))
}

pub async fn delete_farm(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    let deleted = Farm::delete(&state.db().pool, id).await?;
    if deleted == 0 {
        return Err(ApiError::NotFound("farm"));
    }
    Ok(ResponseJson(ApiResponse::success(())))
}

pub fn router() -> Router<AppState> {
    Router::new().nest(
        "/farms",
        Router::new()
            .route("/", get(list_farms).post(create_farm))
            .route("/{id}", get(get_farm).put(update_farm).delete(delete_farm)),
    )
}
