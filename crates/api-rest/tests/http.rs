//! End-to-end tests driving the full router through tower, no network involved.

use api_rest::{app, AppState};
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use berani_core::{ChatMessage, ChatProvider, CoreConfig, ProviderError};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

struct FailingProvider;

#[async_trait]
impl ChatProvider for FailingProvider {
    fn name(&self) -> &'static str {
        "failing"
    }

    async fn chat(
        &self,
        _messages: Vec<ChatMessage>,
        timeout: Duration,
    ) -> Result<String, ProviderError> {
        Err(ProviderError::Timeout(timeout))
    }
}

struct EmptyProvider;

#[async_trait]
impl ChatProvider for EmptyProvider {
    fn name(&self) -> &'static str {
        "empty"
    }

    async fn chat(
        &self,
        _messages: Vec<ChatMessage>,
        _timeout: Duration,
    ) -> Result<String, ProviderError> {
        Err(ProviderError::EmptyOutput)
    }
}

struct CannedProvider(&'static str);

#[async_trait]
impl ChatProvider for CannedProvider {
    fn name(&self) -> &'static str {
        "canned"
    }

    async fn chat(
        &self,
        _messages: Vec<ChatMessage>,
        _timeout: Duration,
    ) -> Result<String, ProviderError> {
        Ok(self.0.to_owned())
    }
}

fn test_config(require_report_fields: bool) -> Arc<CoreConfig> {
    Arc::new(
        CoreConfig::new(
            None,
            "https://api.openai.com/v1".into(),
            "gpt-4o-mini".into(),
            false,
            require_report_fields,
        )
        .unwrap(),
    )
}

fn app_without_provider() -> Router {
    app(AppState::with_provider(test_config(false), None))
}

fn app_with_provider(provider: Arc<dyn ChatProvider>) -> Router {
    app(AppState::with_provider(test_config(false), Some(provider)))
}

async fn get_json(router: Router, path: &str) -> (StatusCode, Value) {
    let response = tower::ServiceExt::oneshot(
        router,
        Request::builder().uri(path).body(Body::empty()).unwrap(),
    )
    .await
    .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn post_json(router: Router, path: &str, body: Value) -> (StatusCode, Value) {
    let response = tower::ServiceExt::oneshot(
        router,
        Request::builder()
            .method("POST")
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::String(
            String::from_utf8_lossy(&bytes).into_owned(),
        ))
    };
    (status, value)
}

#[tokio::test]
async fn test_root_reports_service_identity() {
    let (status, body) = get_json(app_without_provider(), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], json!(true));
    assert_eq!(body["service"], json!("berani-backend"));
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_health_endpoint() {
    let (status, body) = get_json(app_without_provider(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!("healthy"));
}

#[tokio::test]
async fn test_diag_without_key() {
    let (status, body) = get_json(app_without_provider(), "/diag").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], json!(true));
    assert_eq!(body["has_env_key"], json!(false));
    assert_eq!(body["client_ready"], json!(false));
    assert_eq!(body["openai_lib"], Value::Null);
    assert_eq!(body["openai_error"], Value::Null);
}

#[tokio::test]
async fn test_diag_openai_without_provider_never_raises() {
    let (status, body) = get_json(app_without_provider(), "/diag_openai").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], json!(false));
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_diag_openai_round_trip() {
    let router = app_with_provider(Arc::new(CannedProvider("OK")));
    let (status, body) = get_json(router, "/diag_openai").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], json!(true));
    assert_eq!(body["reply"], json!("OK"));
}

#[tokio::test]
async fn test_assistant_empty_question() {
    let (status, body) =
        post_json(app_without_provider(), "/assistant", json!({"question": ""})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["answer"], json!("Please enter a question."));
}

#[tokio::test]
async fn test_assistant_missing_body_treated_as_empty_question() {
    let (status, body) = post_json(app_without_provider(), "/assistant", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["answer"], json!("Please enter a question."));
}

#[tokio::test]
async fn test_assistant_without_provider_falls_back() {
    let (status, body) = post_json(
        app_without_provider(),
        "/assistant",
        json!({"question": "What should I do after an incident?"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["answer"], json!(berani_core::fallback::ANSWER_FALLBACK));
    assert_eq!(body["meta"]["fallback"], json!(true));
    assert_eq!(body["meta"]["reason"], json!("no_client"));
}

#[tokio::test]
async fn test_assistant_provider_failure_degrades_to_200() {
    let router = app_with_provider(Arc::new(FailingProvider));
    let (status, body) = post_json(router, "/assistant", json!({"question": "help"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["fallback"], json!(true));
    assert_eq!(body["meta"]["reason"], json!("timeout"));
    assert!(body["answer"].as_str().unwrap().contains("general guidance"));
}

#[tokio::test]
async fn test_assistant_empty_provider_output_substituted() {
    let router = app_with_provider(Arc::new(EmptyProvider));
    let (status, body) = post_json(router, "/assistant", json!({"question": "help"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_ne!(body["answer"], json!(""));
    assert_eq!(body["meta"]["fallback"], json!(true));
}

#[tokio::test]
async fn test_generate_report_without_provider() {
    let (status, body) = post_json(
        app_without_provider(),
        "/generate_report",
        json!({
            "category": "Bullying",
            "dateISO": "2024-01-01T10:00:00Z",
            "timeISO": "2024-01-01T10:00:00Z",
            "locationText": "Cafeteria",
            "description": "Shoved by classmate"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let report = body["report"].as_str().unwrap();
    assert!(report.contains("Bullying"));
    assert!(report.contains("Cafeteria"));
    assert!(report.contains("Shoved by classmate"));
    assert_eq!(body["meta"]["fallback"], json!(true));
    assert_eq!(body["meta"]["reason"], json!("no_client"));
}

#[tokio::test]
async fn test_generate_report_provider_failure_degrades_to_template() {
    let router = app_with_provider(Arc::new(FailingProvider));
    let (status, body) = post_json(
        router,
        "/generate_report",
        json!({"description": "Phone stolen near the station"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["report"]
        .as_str()
        .unwrap()
        .contains("Phone stolen near the station"));
    assert_eq!(body["meta"]["fallback"], json!(true));
    // Debug flag is off, so the error class stays internal.
    assert_eq!(body["meta"]["reason"], Value::Null);
}

#[tokio::test]
async fn test_generate_report_provider_success() {
    let router = app_with_provider(Arc::new(CannedProvider("Drafted report.")));
    let (status, body) = post_json(router, "/generate_report", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["report"], json!("Drafted report."));
    assert_eq!(body["meta"], Value::Null);
}

#[tokio::test]
async fn test_required_fields_flag_maps_to_400() {
    let router = app(AppState::with_provider(test_config(true), None));
    let (status, _) = post_json(router, "/generate_report", json!({"category": "Theft"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_assistant_aliases_reach_canonical_handler() {
    for path in ["/chat", "/api/chat", "/v1/chat", "/messages", "/api/messages", "/respond"] {
        let (status, body) =
            post_json(app_without_provider(), path, json!({"question": ""})).await;
        assert_eq!(status, StatusCode::OK, "alias {path}");
        assert_eq!(body["answer"], json!("Please enter a question."), "alias {path}");
    }
}

#[tokio::test]
async fn test_report_aliases_reach_canonical_handler() {
    for path in ["/report", "/api/report", "/v1/report", "/generate", "/api/generate"] {
        let (status, body) = post_json(
            app_without_provider(),
            path,
            json!({"category": "Harassment"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "alias {path}");
        assert!(
            body["report"].as_str().unwrap().contains("Harassment"),
            "alias {path}"
        );
    }
}
