//! Eligibility reference list.

use axum::{
    Router,
    extract::{Path, State},
    response::Json as ResponseJson,
    routing::get,
};
use db::models::eligibility::{CreateEligibility, Eligibility};
use utils::response::ApiResponse;
use uuid::Uuid;

use crate::{AppState, error::ApiError};

pub async fn list_eligibilities(
    State(state): State<AppState>,
) -> Result<ResponseJson<ApiResponse<Vec<Eligibility>>>, ApiError> {
    let eligibilities = Eligibility::find_all(&state.db().pool).await?;
    Ok(ResponseJson(ApiResponse::success(eligibilities)))
}

pub async fn create_eligibility(
    State(state): State<AppState>,
    axum::Json(payload): axum::Json<CreateEligibility>,
) -> Result<ResponseJson<ApiResponse<Eligibility>>, ApiError> {
    if payload.eligibility_type.trim().is_empty() {
        return Err(ApiError::Validation(
            "eligibility_type must not be empty".to_string(),
        ));
    }
    let eligibility = Eligibility::create(&state.db().pool, &payload, Uuid::new_v4()).await?;
    Ok(ResponseJson(ApiResponse::success(eligibility)))
}

pub async fn delete_eligibility(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    let deleted = Eligibility::delete(&state.db().pool, id).await?;
    if deleted == 0 {
        return Err(ApiError::NotFound("eligibility"));
    }
    Ok(ResponseJson(ApiResponse::success(())))
}

pub fn router() -> Router<AppState> {
    Router::new().nest(
        "/eligibilities",
        Router::new()
            .route("/", get(list_eligibilities).post(create_eligibility))
            .route("/{id}", axum::routing::delete(delete_eligibility)),
    )
}
