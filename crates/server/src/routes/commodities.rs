//! CRUD for commodity categories and the commodities they own.

use axum::{
    Router,
    extract::{Path, State},
    response::Json as ResponseJson,
    routing::get,
};
use db::models::commodity::{
    Commodity, CommodityCategory, CommodityCategoryWithCommodities, CreateCommodity,
    CreateCommodityCategory,
};
use utils::response::ApiResponse;
use uuid::Uuid;

use crate::{AppState, error::ApiError};

pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<ResponseJson<ApiResponse<Vec<CommodityCategoryWithCommodities>>>, ApiError> {
    let categories = CommodityCategory::find_all_with_commodities(&state.db().pool).await?;
    Ok(ResponseJson(ApiResponse::success(categories)))
}

pub async fn create_category(
    State(state): State<AppState>,
    axum::Json(payload): axum::Json<CreateCommodityCategory>,
) -> Result<ResponseJson<ApiResponse<CommodityCategory>>, ApiError> {
    if payload.name.trim().is_empty() {
        return Err(ApiError::Validation("name must not be empty".to_string()));
    }
    let category = CommodityCategory::create(&state.db().pool, &payload, Uuid::new_v4()).await?;
    Ok(ResponseJson(ApiResponse::success(category)))
}

pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<CommodityCategory>>, ApiError> {
    let category = CommodityCategory::find_by_id(&state.db().pool, id)
        .await?
        .ok_or(ApiError::NotFound("commodity category"))?;
    Ok(ResponseJson(ApiResponse::success(category)))
}

pub async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    axum::Json(payload): axum::Json<CreateCommodityCategory>,
) -> Result<ResponseJson<ApiResponse<CommodityCategory>>, ApiError> {
    CommodityCategory::find_by_id(&state.db().pool, id)
        .await?
        .ok_or(ApiError::NotFound("commodity category"))?;
    let category = CommodityCategory::update(&state.db().pool, id, &payload).await?;
    Ok(ResponseJson(ApiResponse::success(category)))
}

pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    let deleted = CommodityCategory::delete(&state.db().pool, id).await?;
    if deleted == 0 {
        return Err(ApiError::NotFound("commodity category"));
    }
    Ok(ResponseJson(ApiResponse::success(())))
}

pub async fn list_commodities(
    State(state): State<AppState>,
) -> Result<ResponseJson<ApiResponse<Vec<Commodity>>>, ApiError> {
    let commodities = Commodity::find_all(&state.db().pool).await?;
    Ok(ResponseJson(ApiResponse::success(commodities)))
}

pub async fn get_commodity(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<Commodity>>, ApiError> {
    let commodity = Commodity::find_by_id(&state.db().pool, id)
        .await?
        .ok_or(ApiError::NotFound("commodity"))?;
    Ok(ResponseJson(ApiResponse::success(commodity)))
}

pub async fn create_commodity(
    State(state): State<AppState>,
    axum::Json(payload): axum::Json<CreateCommodity>,
) -> Result<ResponseJson<ApiResponse<Commodity>>, ApiError> {
    if payload.name.trim().is_empty() {
        return Err(ApiError::Validation("name must not be empty".to_string()));
    }
    CommodityCategory::find_by_id(&state.db().pool, payload.category_id)
        .await?
        .ok_or(ApiError::NotFound("commodity category"))?;
    let commodity = Commodity::create(&state.db().pool, &payload, Uuid::new_v4()).await?;
    Ok(ResponseJson(ApiResponse::success(commodity)))
}

pub async fn update_commodity(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    axum::Json(payload): axum::Json<CreateCommodity>,
) -> Result<ResponseJson<ApiResponse<Commodity>>, ApiError> {
    Commodity::find_by_id(&state.db().pool, id)
        .await?
        .ok_or(ApiError::NotFound("commodity"))?;
    let commodity = Commodity::update(&state.db().pool, id, &payload).await?;
    Ok(ResponseJson(ApiResponse::success(commodity)))
}

pub async fn delete_commodity(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    let deleted = Commodity::delete(&state.db().pool, id).await?;
    if deleted == 0 {
        return Err(ApiError::NotFound("commodity"));
    }
    Ok(ResponseJson(ApiResponse::success(())))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .nest(
            "/commodity-categories",
            Router::new()
                .route("/", get(list_categories).post(create_category))
                .route(
                    "/{id}",
                    get(get_category).put(update_category).delete(delete_category),
                ),
        )
        .nest(
            "/commodities",
            Router::new()
                .route("/", get(list_commodities).post(create_commodity))
                .route(
                    "/{id}",
                    get(get_commodity).put(update_commodity).delete(delete_commodity),
                ),
        )
}
