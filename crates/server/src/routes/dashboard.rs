//! Dashboard aggregates: headline totals, the per-barangay heatmap report,
//! and the distribution series behind the charts.

use axum::{
    Router,
    extract::{Query, State},
    response::Json as ResponseJson,
    routing::get,
};
use db::models::farmer::FarmerStatus;
use serde::Deserialize;
use services::services::{
    distribution::{AllocationDistribution, DistributionService, FarmerDistribution},
    intensity::{self, LegendEntry},
    report::{DashboardData, ReportService},
};
use ts_rs::TS;
use utils::response::ApiResponse;
use uuid::Uuid;

use crate::{AppState, error::ApiError};

/// `year` and `subcategory` both treat `"all"` (or absence) as no filter.
#[derive(Debug, Clone, Default, Deserialize, TS)]
pub struct DistributionQuery {
    pub year: Option<String>,
    pub subcategory: Option<String>,
}

fn year_filter(query: &DistributionQuery) -> Option<&str> {
    query
        .year
        .as_deref()
        .filter(|year| !year.is_empty() && *year != "all")
}

pub async fn get_dashboard(
    State(state): State<AppState>,
) -> Result<ResponseJson<ApiResponse<DashboardData>>, ApiError> {
    let data = ReportService::dashboard(&state.db().pool).await?;
    Ok(ResponseJson(ApiResponse::success(data)))
}

pub async fn get_farmers_distribution(
    State(state): State<AppState>,
    Query(query): Query<DistributionQuery>,
) -> Result<ResponseJson<ApiResponse<Vec<FarmerDistribution>>>, ApiError> {
    let status = query
        .subcategory
        .as_deref()
        .and_then(|subcategory| subcategory.parse::<FarmerStatus>().ok());

    let data =
        DistributionService::farmers_by_barangay(&state.db().pool, year_filter(&query), status)
            .await?;
    Ok(ResponseJson(ApiResponse::success(data)))
}

pub async fn get_allocations_distribution(
    State(state): State<AppState>,
    Query(query): Query<DistributionQuery>,
) -> Result<ResponseJson<ApiResponse<Vec<AllocationDistribution>>>, ApiError> {
    let allocation_type_id = query
        .subcategory
        .as_deref()
        .and_then(|subcategory| Uuid::parse_str(subcategory).ok());

    let data = DistributionService::allocations_by_barangay(
        &state.db().pool,
        year_filter(&query),
        allocation_type_id,
    )
    .await?;
    Ok(ResponseJson(ApiResponse::success(data)))
}

pub async fn get_intensity_legend() -> ResponseJson<ApiResponse<Vec<LegendEntry>>> {
    ResponseJson(ApiResponse::success(intensity::legend()))
}

pub fn router() -> Router<AppState> {
    Router::new().nest(
        "/dashboard",
        Router::new()
            .route("/", get(get_dashboard))
            .route("/farmers-distribution", get(get_farmers_distribution))
            .route("/allocations-distribution", get(get_allocations_distribution))
            .route("/intensity-legend", get(get_intensity_legend)),
    )
}
