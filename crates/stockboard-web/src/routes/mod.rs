pub mod dashboard;

use std::sync::Arc;

use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Assemble the application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(dashboard::routes())
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use stockboard_core::{DashboardSettings, MemoizedFetcher, SyntheticSource};
    use tower::ServiceExt;

    fn app() -> Router {
        let fetcher = MemoizedFetcher::new(Arc::new(SyntheticSource));
        router(AppState::new(fetcher, DashboardSettings::default()))
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, Option<String>, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).expect("request"))
            .await
            .expect("router is infallible");
        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        (status, content_type, String::from_utf8_lossy(&body).into_owned())
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let (status, _, body) = get(app(), "/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            serde_json::from_str::<Value>(&body).expect("json"),
            json!({ "status": "ok" })
        );
    }

    #[tokio::test]
    async fn page_renders_charts_for_a_known_ticker() {
        let (status, content_type, body) =
            get(app(), "/?ticker=msft&start=2023-01-02&end=2023-01-16").await;

        assert_eq!(status, StatusCode::OK);
        assert!(content_type.unwrap_or_default().starts_with("text/html"));
        assert!(body.contains("<h1>MSFT stock price analysis</h1>"));
        assert!(body.contains("<polyline"));
        assert_eq!(body.matches("<rect").count(), 10);
    }

    #[tokio::test]
    async fn page_uses_defaults_without_parameters() {
        let (status, _, body) = get(app(), "/").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(r#"value="AAPL""#));
    }

    #[tokio::test]
    async fn page_shows_warning_for_unknown_ticker() {
        let (status, _, body) =
            get(app(), "/?ticker=ZZZZINVALID&start=2023-01-01&end=2023-06-01").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("No stock data found for &#39;ZZZZINVALID&#39;"));
        assert!(!body.contains("<svg"));
    }

    #[tokio::test]
    async fn api_returns_the_plan_as_json() {
        let (status, content_type, body) =
            get(app(), "/api/dashboard?ticker=SPY&start=2023-01-02&end=2023-01-09").await;

        assert_eq!(status, StatusCode::OK);
        assert!(content_type.unwrap_or_default().starts_with("application/json"));

        let value: Value = serde_json::from_str(&body).expect("json");
        assert_eq!(value["provider"], "synthetic");
        assert_eq!(value["status"], "rendered");
        assert_eq!(value["form"]["ticker"], "SPY");
        assert!(value["request_id"].as_str().is_some());

        let kinds: Vec<&str> = value["main"]
            .as_array()
            .expect("main array")
            .iter()
            .filter_map(|element| element["kind"].as_str())
            .collect();
        assert_eq!(
            kinds,
            [
                "title",
                "subheader",
                "close_table",
                "subheader",
                "line_chart",
                "subheader",
                "bar_chart"
            ]
        );
    }

    #[tokio::test]
    async fn api_halts_on_reversed_range() {
        let (status, _, body) =
            get(app(), "/api/dashboard?ticker=AAPL&start=2023-06-01&end=2023-01-01").await;

        assert_eq!(status, StatusCode::OK);
        let value: Value = serde_json::from_str(&body).expect("json");
        assert_eq!(value["status"], "halted");
        assert_eq!(value["main"], json!([]));
    }

    #[tokio::test]
    async fn unparseable_date_is_a_bad_request() {
        let (status, _, body) = get(app(), "/api/dashboard?start=06/01/2023").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let value: Value = serde_json::from_str(&body).expect("json");
        assert!(value["error"]
            .as_str()
            .unwrap_or_default()
            .contains("06/01/2023"));
    }

    #[tokio::test]
    async fn blank_parameters_fall_back_to_defaults() {
        let (status, _, body) = get(app(), "/api/dashboard?ticker=&start=&end=").await;

        assert_eq!(status, StatusCode::OK);
        let value: Value = serde_json::from_str(&body).expect("json");
        assert_eq!(value["form"]["ticker"], "AAPL");
    }
}
