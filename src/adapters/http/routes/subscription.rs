use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use data_platform_types::DataEnvelope;
use serde::Deserialize;

use crate::{
    adapters::http::app_state::AppState,
    app_error::AppResult,
    domain::entities::{GeoRegion, Plan, Product, Region},
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/regions", get(list_regions))
        .route("/geo/regions", get(list_geo_regions))
        .route("/geo/regions/{geo}/markets", get(list_geo_markets))
        .route("/regions/{region}/products", get(list_products))
        .route(
            "/regions/{region}/products/{product}/plans",
            get(list_plans),
        )
}

#[derive(Debug, Deserialize)]
struct PlansQuery {
    currency: Option<String>,
}

/// GET /subscription/regions
async fn list_regions(
    State(app_state): State<AppState>,
) -> AppResult<Json<DataEnvelope<Vec<Region>>>> {
    let regions = app_state.catalog_use_cases.list_regions().await?;
    Ok(Json(DataEnvelope::new(regions)))
}

/// GET /subscription/geo/regions
async fn list_geo_regions(
    State(app_state): State<AppState>,
) -> AppResult<Json<DataEnvelope<Vec<GeoRegion>>>> {
    let geos = app_state.catalog_use_cases.list_geo_regions().await?;
    Ok(Json(DataEnvelope::new(geos)))
}

/// GET /subscription/geo/regions/{geo}/markets
async fn list_geo_markets(
    State(app_state): State<AppState>,
    Path(geo): Path<String>,
) -> AppResult<Json<DataEnvelope<Vec<Region>>>> {
    let markets = app_state.catalog_use_cases.list_geo_markets(&geo).await?;
    Ok(Json(DataEnvelope::new(markets)))
}

/// GET /subscription/regions/{region}/products
async fn list_products(
    State(app_state): State<AppState>,
    Path(region): Path<String>,
) -> AppResult<Json<DataEnvelope<Vec<Product>>>> {
    let products = app_state.catalog_use_cases.list_products(&region).await?;
    Ok(Json(DataEnvelope::new(products)))
}

/// GET /subscription/regions/{region}/products/{product}/plans?currency=CCY
/// Without a currency the region's own currency is used.
async fn list_plans(
    State(app_state): State<AppState>,
    Path((region, product)): Path<(String, String)>,
    Query(query): Query<PlansQuery>,
) -> AppResult<Json<DataEnvelope<Vec<Plan>>>> {
    let plans = app_state
        .catalog_use_cases
        .list_plans(&region, &product, query.currency.as_deref())
        .await?;
    Ok(Json(DataEnvelope::new(plans)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::json;

    use crate::test_utils::{FailingCatalogRepo, TestAppStateBuilder};

    fn server() -> TestServer {
        let app_state = TestAppStateBuilder::new().build();
        TestServer::new(router().with_state(app_state)).unwrap()
    }

    // =========================================================================
    // Regions
    // =========================================================================

    #[tokio::test]
    async fn regions_are_wrapped_in_data() {
        let response = server().get("/regions").await;

        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["data"].as_array().unwrap().len(), 4);
        assert_eq!(
            body["data"][0],
            json!({
                "key": "india",
                "label": "INDIA",
                "name": "India",
                "currency": "INR",
                "geo": "asia"
            })
        );
    }

    #[tokio::test]
    async fn geo_regions_embed_markets() {
        let response = server().get("/geo/regions").await;

        response.assert_status_ok();
        let body: DataEnvelope<Vec<GeoRegion>> = response.json();
        let europe = body.data.iter().find(|g| g.key == "europe").unwrap();
        assert_eq!(europe.label, "Europe");
        assert_eq!(europe.markets[0].key, "ue");
    }

    #[tokio::test]
    async fn geo_markets_unknown_geo_is_404() {
        let response = server().get("/geo/regions/atlantis/markets").await;

        response.assert_status(StatusCode::NOT_FOUND);
        response.assert_json(&json!({ "error": "Unknown geography region", "code": "NOT_FOUND" }));
    }

    #[tokio::test]
    async fn geo_markets_match_case_insensitively() {
        let response = server().get("/geo/regions/OCEANIA/markets").await;

        response.assert_status_ok();
        let body: DataEnvelope<Vec<Region>> = response.json();
        assert_eq!(body.data[0].key, "au");
    }

    // =========================================================================
    // Products
    // =========================================================================

    #[tokio::test]
    async fn products_follow_availability() {
        let response = server().get("/regions/us/products").await;

        response.assert_status_ok();
        let body: DataEnvelope<Vec<Product>> = response.json();
        let keys: Vec<_> = body.data.iter().map(|p| p.key.as_str()).collect();
        assert_eq!(keys, vec!["forex", "futures_options"]);
    }

    #[tokio::test]
    async fn products_unknown_region_is_404() {
        let response = server().get("/regions/mars/products").await;

        response.assert_status(StatusCode::NOT_FOUND);
        response.assert_json(&json!({ "error": "Unknown region", "code": "NOT_FOUND" }));
    }

    // =========================================================================
    // Plans
    // =========================================================================

    #[tokio::test]
    async fn plans_default_to_region_currency() {
        let response = server().get("/regions/india/products/equity/plans").await;

        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        let starter = &body["data"][0];
        assert_eq!(starter["id"], "plan_equity_india_starter");
        assert_eq!(starter["key"], "starter");
        assert_eq!(starter["currency"], "INR");
        assert_eq!(starter["priceMonthlyUSD"], 79.0);
        assert_eq!(starter["priceMonthly"], 6557.0);
        assert_eq!(starter["limits"]["apiCallsPerMonth"], "750,000");
    }

    #[tokio::test]
    async fn plans_honour_currency_query() {
        let response = server()
            .get("/regions/india/products/equity/plans")
            .add_query_param("currency", "aud")
            .await;

        response.assert_status_ok();
        let body: DataEnvelope<Vec<Plan>> = response.json();
        assert!(body.data.iter().all(|p| p.currency == "AUD"));
        assert_eq!(body.data[0].price_monthly, 122.0); // 79 * 1.55 = 122.45
    }

    #[tokio::test]
    async fn plans_unknown_region_is_404() {
        let response = server().get("/regions/mars/products/equity/plans").await;

        response.assert_status(StatusCode::NOT_FOUND);
        response.assert_json(&json!({ "error": "Unknown region", "code": "NOT_FOUND" }));
    }

    #[tokio::test]
    async fn plans_product_not_offered_is_404() {
        let response = server().get("/regions/us/products/equity/plans").await;

        response.assert_status(StatusCode::NOT_FOUND);
        response.assert_json(
            &json!({ "error": "Product not available for region", "code": "NOT_FOUND" }),
        );
    }

    // =========================================================================
    // Failures
    // =========================================================================

    #[tokio::test]
    async fn storage_failure_is_500_without_details() {
        let app_state = TestAppStateBuilder::new()
            .with_repo(std::sync::Arc::new(FailingCatalogRepo))
            .build();
        let server = TestServer::new(router().with_state(app_state)).unwrap();

        let response = server.get("/regions").await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        response.assert_json(&json!({ "error": "Storage error", "code": "STORAGE_ERROR" }));
    }
}
