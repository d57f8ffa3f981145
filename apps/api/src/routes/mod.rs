pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::layout::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Layout API
        .route("/api/v1/layout", post(handlers::handle_layout))
        .route("/api/v1/compose", post(handlers::handle_compose))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::layout::LayoutConfig;

    fn test_router() -> Router {
        build_router(AppState {
            config: Config {
                port: 0,
                rust_log: "debug".to_string(),
                layout: LayoutConfig::default(),
            },
        })
    }

    async fn post_json(uri: &str, body: &str) -> (StatusCode, Value) {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health_reports_ok() {
        let response = test_router()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_layout_places_every_nonblank_line() {
        let (status, body) = post_json(
            "/api/v1/layout",
            r#"{"title": "TEST", "content": "Design\n\nCreative\n  \nArt", "seed": 7}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["seed"], 7);
        assert_eq!(body["canvas"]["width"], 1280);
        let texts: Vec<&str> = body["placements"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["text"].as_str().unwrap())
            .collect();
        assert_eq!(texts, vec!["Design", "Creative", "Art"]);
        assert_eq!(body["outcomes"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_layout_same_seed_same_body() {
        let request = r#"{"title": "TEST", "content": "a\nb\nc\nd\ne", "aspect_ratio": "4:5", "seed": 99}"#;
        let (_, first) = post_json("/api/v1/layout", request).await;
        let (_, second) = post_json("/api/v1/layout", request).await;
        assert_eq!(first, second);
        assert_eq!(first["canvas"]["height"], 1350);
    }

    #[tokio::test]
    async fn test_layout_generates_seed_when_missing() {
        let (status, body) =
            post_json("/api/v1/layout", r#"{"title": "T", "content": "a"}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["seed"].is_u64());
    }

    #[tokio::test]
    async fn test_layout_empty_content_returns_empty_list() {
        let (status, body) =
            post_json("/api/v1/layout", r#"{"title": "T", "content": "\n \n"}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["placements"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_layout_rejects_inverted_font_range() {
        let (status, body) = post_json(
            "/api/v1/layout",
            r#"{"title": "T", "content": "a", "font_size_range": {"min": 50, "max": 10}}"#,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_layout_rejects_zero_canvas() {
        let (status, _) = post_json(
            "/api/v1/layout",
            r#"{"title": "T", "content": "a", "canvas": {"width": 0, "height": 720}}"#,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_layout_rejects_zero_title_font_size() {
        let (status, body) = post_json(
            "/api/v1/layout",
            r#"{"title": "T", "content": "a", "title_font_size": 0}"#,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("title_font_size"));
    }

    #[tokio::test]
    async fn test_layout_rejects_too_many_segments() {
        let content = vec!["x"; handlers::MAX_SEGMENTS + 1].join("\n");
        let request = serde_json::json!({ "title": "T", "content": content }).to_string();
        for uri in ["/api/v1/layout", "/api/v1/compose"] {
            let (status, body) = post_json(uri, &request).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
            assert!(body["error"]["message"].as_str().unwrap().contains("segments"));
        }
    }

    #[tokio::test]
    async fn test_layout_rejects_oversized_canvas() {
        let (status, body) = post_json(
            "/api/v1/layout",
            r#"{"title": "T", "content": "a", "canvas": {"width": 1280, "height": 100000}}"#,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_compose_orders_background_segments_title() {
        let (status, body) = post_json(
            "/api/v1/compose",
            r#"{"title": "TEST", "content": "Design\nArt", "strategy": "proportional",
                "seed": 1, "background": {"width": 1920, "height": 1080}}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let kinds: Vec<&str> = body["ops"]
            .as_array()
            .unwrap()
            .iter()
            .map(|op| op["op"].as_str().unwrap())
            .collect();
        assert_eq!(kinds.first(), Some(&"background"));
        assert_eq!(kinds[kinds.len() - 2..], ["title_highlight", "title_line"]);
        assert!(kinds.iter().filter(|k| **k == "segment").count() >= 2);
    }
}
