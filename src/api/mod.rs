//! HTTP API module
//!
//! This module exposes the timer controller to the presentation layer:
//! intent endpoints, status and health.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/duration", put(duration_handler))
        .route("/start", post(start_handler))
        .route("/pause", post(pause_handler))
        .route("/reset", post(reset_handler))
        .route("/status", get(status_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::TimerSettings;

    fn test_router() -> Router {
        let state = AppState::new(20554, "127.0.0.1".to_string(), TimerSettings::default());
        create_router(Arc::new(state))
    }

    async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        (status, value)
    }

    #[tokio::test]
    async fn test_health() {
        let app = test_router();
        let (status, body) = call(&app, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_initial_status() {
        let app = test_router();
        let (status, body) = call(&app, "GET", "/status", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["timer"]["formatted"], "10:00");
        assert_eq!(body["timer"]["seconds_remaining"], 600);
        assert_eq!(body["timer"]["running"], false);
        assert_eq!(body["clock"], "counter");
        assert_eq!(body["last_expiry"], Value::Null);
    }

    #[tokio::test]
    async fn test_start_with_invalid_input_is_ignored() {
        let app = test_router();
        let (status, body) = call(&app, "PUT", "/duration", Some(json!({ "input": "abc" }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["timer"]["duration_input"], "abc");

        let (status, body) = call(&app, "POST", "/start", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ignored");
        assert_eq!(body["timer"]["seconds_remaining"], 600);
        assert_eq!(body["timer"]["running"], false);
    }

    #[tokio::test]
    async fn test_start_pause_reset_flow() {
        let app = test_router();
        call(&app, "PUT", "/duration", Some(json!({ "input": "3" }))).await;

        let (_, body) = call(&app, "POST", "/start", None).await;
        assert_eq!(body["status"], "running");
        assert_eq!(body["timer"]["formatted"], "03:00");

        // No tick yet, so pausing is a no-op
        let (_, body) = call(&app, "POST", "/pause", None).await;
        assert_eq!(body["status"], "ignored");
        assert_eq!(body["timer"]["running"], true);

        call(&app, "PUT", "/duration", Some(json!({ "input": "" }))).await;
        let (_, body) = call(&app, "POST", "/reset", None).await;
        assert_eq!(body["status"], "idle");
        assert_eq!(body["timer"]["seconds_remaining"], 0);
        assert_eq!(body["timer"]["formatted"], "00:00");

        let (_, body) = call(&app, "GET", "/status", None).await;
        assert_eq!(body["last_action"], "reset");
    }

    #[tokio::test]
    async fn test_malformed_duration_body_is_rejected() {
        let app = test_router();
        let (status, _) = call(&app, "PUT", "/duration", Some(json!({ "minutes": 3 }))).await;
        assert!(status.is_client_error());
    }
}
