//! CRUD for crop damage reports and their causes.

use axum::{
    Router,
    extract::{Path, State},
    response::Json as ResponseJson,
    routing::get,
};
use db::models::crop_damage::{
    CreateCropDamage, CreateCropDamageCause, CropDamage, CropDamageCause, CropDamageWithNames,
};
use utils::response::ApiResponse;
use uuid::Uuid;

use crate::{AppState, error::ApiError};

pub async fn list_causes(
    State(state): State<AppState>,
) -> Result<ResponseJson<ApiResponse<Vec<CropDamageCause>>>, ApiError> {
    let causes = CropDamageCause::find_all(&state.db().pool).await?;
    Ok(ResponseJson(ApiResponse::success(causes)))
}

pub async fn create_cause(
    State(state): State<AppState>,
    axum::Json(payload): axum::Json<CreateCropDamageCause>,
) -> Result<ResponseJson<ApiResponse<CropDamageCause>>, ApiError> {
    if payload.name.trim().is_empty() {
        return Err(ApiError::Validation("name must not be empty".to_string()));
    }
    let cause = CropDamageCause::create(&state.db().pool, &payload, Uuid::new_v4()).await?;
    Ok(ResponseJson(ApiResponse::success(cause)))
}

pub async fn get_cause(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<CropDamageCause>>, ApiError> {
    let cause = CropDamageCause::find_by_id(&state.db().pool, id)
        .await?
        .ok_or(ApiError::NotFound("crop damage cause"))?;
    Ok(ResponseJson(ApiResponse::success(cause)))
}

pub async fn update_cause(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    axum::Json(payload): axum::Json<CreateCropDamageCause>,
) -> Result<ResponseJson<ApiResponse<CropDamageCause>>, ApiError> {
    CropDamageCause::find_by_id(&state.db().pool, id)
        .await?
        .ok_or(ApiError::NotFound("crop damage cause"))?;
    let cause = CropDamageCause::update(&state.db().pool, id, &payload).await?;
    Ok(ResponseJson(ApiResponse::success(cause)))
}

pub async fn delete_cause(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    let deleted = CropDamageCause::delete(&state.db().pool, id).await?;
    if deleted == 0 {
        return Err(ApiError::NotFound("crop damage cause"));
    }
    Ok(ResponseJson(ApiResponse::success(())))
}

pub async fn list_crop_damages(
    State(state): State<AppState>,
) -> Result<ResponseJson<ApiResponse<Vec<CropDamageWithNames>>>, ApiError> {
    let damages = CropDamage::find_all_with_names(&state.db().pool).await?;
    Ok(ResponseJson(ApiResponse::success(damages)))
}

pub async fn get_crop_damage(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<CropDamage>>, ApiError> {
    let damage = CropDamage::find_by_id(&state.db().pool, id)
        .await?
        .ok_or(ApiError::NotFound("crop damage"))?;
    Ok(ResponseJson(ApiResponse::success(damage)))
}

pub async fn create_crop_damage(
    State(state): State<AppState>,
    axum::Json(payload): axum::Json<CreateCropDamage>,
) -> Result<ResponseJson<ApiResponse<CropDamage>>, ApiError> {
    if payload.total_damaged_area < 0.0 || payload.partially_damaged_area < 0.0 {
        return Err(ApiError::Validation(
            "damaged areas must be non-negative".to_string(),
        ));
    }
    let damage = CropDamage::create(&state.db().pool, &payload, Uuid::new_v4()).await?;
    Ok(ResponseJson(ApiResponse::success(damage)))
}

pub async fn update_crop_damage(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    axum::Json(payload): axum::Json<CreateCropDamage>,
) -> Result<ResponseJson<ApiResponse<CropDamage>>, ApiError> {
    CropDamage::find_by_id(&state.db().pool, id)
        .await?
        .ok_or(ApiError::NotFound("crop damage"))?;
    let damage = CropDamage::update(&state.db().pool, id, &payload).await?;
    Ok(ResponseJson(ApiResponse::success(damage)))
}

pub async fn delete_crop_damage(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    let deleted = CropDamage::delete(&state.db().pool, id).await?;
    if deleted == 0 {
        return Err(ApiError::NotFound("crop damage"));
    }
    Ok(ResponseJson(ApiResponse::success(())))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .nest(
            "/crop-damage-causes",
            Router::new()
                .route("/", get(list_causes).post(create_cause))
                .route("/{id}", get(get_cause).put(update_cause).delete(delete_cause)),
        )
        .nest(
            "/crop-damages",
            Router::new()
                .route("/", get(list_crop_damages).post(create_crop_damage))
                .route(
                    "/{id}",
                    get(get_crop_damage)
                        .put(update_crop_damage)
                        .delete(delete_crop_damage),
                ),
        )
}
