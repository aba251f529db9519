//! CRUD and paginated listing for farmer records.

use axum::{
    Router,
    extract::{Path, Query, State},
    response::Json as ResponseJson,
    routing::get,
};
use db::models::{
    eligibility::Eligibility,
    farm::{Farm, FarmWithNames},
    farmer::{CreateFarmer, Farmer, FarmerWithBarangay},
};
use utils::{
    pagination::{PageQuery, Paginated},
    response::ApiResponse,
};
use uuid::Uuid;

use crate::{AppState, error::ApiError};

pub async fn list_farmers(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<ResponseJson<ApiResponse<Paginated<FarmerWithBarangay>>>, ApiError> {
    let page = query.page.unwrap_or(1).max(1);
    let per_page = query.per_page.unwrap_or(25).clamp(1, 100);

    let (farmers, total) =
        Farmer::paginate(&state.db().pool, page, per_page, query.search.as_deref()).await?;

    Ok(ResponseJson(ApiResponse::success(Paginated::new(
        farmers, total, page, per_page,
    ))))
}

pub async fn get_farmer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<Farmer>>, ApiError> {
    let farmer = Farmer::find_by_id(&state.db().pool, id)
        .await?
        .ok_or(ApiError::NotFound("farmer"))?;
    Ok(ResponseJson(ApiResponse::success(farmer)))
}

/// Farms belonging to one farmer, for the farm profile page.
pub async fn get_farmer_farms(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<Vec<FarmWithNames>>>, ApiError> {
    Farmer::find_by_id(&state.db().pool, id)
        .await?
        .ok_or(ApiError::NotFound("farmer"))?;
    let farms = Farm::find_by_farmer_id(&state.db().pool, id).await?;
    Ok(ResponseJson(ApiResponse::success(farms)))
}

pub async fn get_farmer_eligibilities(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<Vec<Eligibility>>>, ApiError> {
    Farmer::find_by_id(&state.db().pool, id)
        .await?
        .ok_or(ApiError::NotFound("farmer"))?;
    let eligibilities = Eligibility::find_by_farmer_id(&state.db().pool, id).await?;
    Ok(ResponseJson(ApiResponse::success(eligibilities)))
}

pub async fn create_farmer(
    State(state): State<AppState>,
    axum::Json(payload): axum::Json<CreateFarmer>,
) -> Result<ResponseJson<ApiResponse<Farmer>>, ApiError> {
    if payload.firstname.trim().is_empty() || payload.lastname.trim().is_empty() {
        return Err(ApiError::Validation(
            "firstname and lastname are required".to_string(),
        ));
    }
    let farmer = Farmer::create(&state.db().pool, &payload, Uuid::new_v4()).await?;
    Ok(ResponseJson(ApiResponse::success(farmer)))
}

pub async fn update_farmer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    axum::Json(payload): axum::Json<CreateFarmer>,
) -> Result<ResponseJson<ApiResponse<Farmer>>, ApiError> {
    Farmer::find_by_id(&state.db().pool, id)
        .await?
        .ok_or(ApiError::NotFound("farmer"))?;
    let farmer = Farmer::update(&state.db().pool, id, &payload).await?;
    Ok(ResponseJson(ApiResponse::success(farmer)))
}

pub async fn delete_farmer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    let deleted = Farmer::delete(&state.db().pool, id).await?;
    if deleted == 0 {
        return Err(ApiError::NotFound("farmer"));
    }
    Ok(ResponseJson(ApiResponse::success(())))
}

pub fn router() -> Router<AppState> {
    Router::new().nest(
        "/farmers",
        Router::new()
            .route("/", get(list_farmers).post(create_farmer))
            .route(
                "/{id}",
                get(get_farmer).put(update_farmer).delete(delete_farmer),
            )
            .route("/{id}/farms", get(get_farmer_farms))
            .route("/{id}/eligibilities", get(get_farmer_eligibilities)),
    )
}
