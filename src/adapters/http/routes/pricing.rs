use axum::{Json, Router, extract::State, routing::get};
use data_platform_types::DataEnvelope;

use crate::{
    adapters::http::app_state::AppState, app_error::AppResult, domain::entities::Region,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/regions", get(list_pricing_regions))
}

/// GET /pricing/regions
/// Billing regions for currency display; same records as the subscription markets.
async fn list_pricing_regions(
    State(app_state): State<AppState>,
) -> AppResult<Json<DataEnvelope<Vec<Region>>>> {
    let regions = app_state.catalog_use_cases.list_regions().await?;
    Ok(Json(DataEnvelope::new(regions)))
}
