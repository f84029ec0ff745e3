use axum::{Router, http};
use http::header::CONTENT_TYPE;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use uuid::Uuid;

use crate::adapters::{self, http::app_state::AppState};

pub fn create_app(app_state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(app_state.config.cors_origin.clone())
        .allow_methods([http::Method::GET, http::Method::OPTIONS])
        .allow_headers([CONTENT_TYPE]);

    Router::new()
        .merge(adapters::http::routes::router())
        .fallback(adapters::http::routes::not_found)
        .with_state(app_state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &http::Request<_>| {
                let request_id = Uuid::new_v4();
                tracing::info_span!(
                    "http-request",
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                    request_id = %request_id
                )
            }),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::json;

    use crate::test_utils::TestAppStateBuilder;

    fn server() -> TestServer {
        TestServer::new(create_app(TestAppStateBuilder::new().build())).unwrap()
    }

    #[tokio::test]
    async fn unknown_path_is_404_json() {
        let response = server().get("/nope").await;

        response.assert_status(StatusCode::NOT_FOUND);
        response.assert_json(&json!({ "error": "Not found", "code": "NOT_FOUND" }));
    }

    #[tokio::test]
    async fn full_plan_path_is_routed() {
        let response = server()
            .get("/subscription/regions/UE/products/FOREX/plans")
            .await;

        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["data"][0]["currency"], "EUR");
        assert_eq!(body["data"][0]["region"], "ue");
    }

    #[tokio::test]
    async fn cors_allows_configured_origin() {
        let response = server()
            .get("/health")
            .add_header("origin", "http://localhost:5173")
            .await;

        response.assert_status_ok();
        assert_eq!(
            response.headers().get("access-control-allow-origin").unwrap(),
            "http://localhost:5173"
        );
    }

    #[tokio::test]
    async fn cors_header_is_the_configured_origin() {
        let app_state = TestAppStateBuilder::new()
            .with_cors_origin("https://shop.example.com")
            .build();
        let server = TestServer::new(create_app(app_state)).unwrap();

        let response = server
            .get("/health")
            .add_header("origin", "http://localhost:5173")
            .await;

        response.assert_status_ok();
        assert_eq!(
            response.headers().get("access-control-allow-origin").unwrap(),
            "https://shop.example.com"
        );
    }
}
