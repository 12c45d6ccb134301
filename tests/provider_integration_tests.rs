use std::time::Duration;

use element_explorer::core::element::{self, ElementRecord};
use element_explorer::lookup::service::{
    FUN_FACT_FALLBACK, FUN_FACT_NOT_CONFIGURED, IMAGE_FALLBACK, IMAGE_NOT_CONFIGURED,
    IMAGE_NO_IMAGE_PART,
};
use element_explorer::lookup::{
    GeminiProvider, LookupError, LookupProvider, UnconfiguredProvider, get_element_image,
    get_fun_fact,
};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_partial_json, header, method, path},
};

// ============================================================================
// Helper Functions
// ============================================================================

const TEXT_MODEL: &str = "gemini-2.5-flash";
const IMAGE_MODEL: &str = "gemini-2.5-flash-image";

fn provider_for(server: &MockServer) -> GeminiProvider {
    GeminiProvider::new(
        "test-key".to_string(),
        server.uri(),
        TEXT_MODEL.to_string(),
        IMAGE_MODEL.to_string(),
        Duration::from_secs(5),
    )
}

fn iron() -> ElementRecord {
    element::bundled()
        .unwrap()
        .into_iter()
        .find(|e| e.symbol == "Fe")
        .unwrap()
}

fn endpoint(model: &str) -> String {
    format!("/models/{model}:generateContent")
}

fn text_response(parts: &[&str]) -> serde_json::Value {
    let parts: Vec<_> = parts.iter().map(|t| json!({ "text": t })).collect();
    json!({ "candidates": [{ "content": { "parts": parts } }] })
}

// ============================================================================
// Fun Fact Tests
// ============================================================================

#[tokio::test]
async fn test_fun_fact_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(endpoint(TEXT_MODEL)))
        .and(header("x-goog-api-key", "test-key"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(text_response(&["  Iron makes up most of ", "Earth's core.\n"])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server);
    let fact = provider.fun_fact(&iron()).await.unwrap();
    assert_eq!(fact, "Iron makes up most of Earth's core.");
}

#[tokio::test]
async fn test_fun_fact_prompt_names_element() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(endpoint(TEXT_MODEL)))
        .and(body_partial_json(json!({
            "contents": [{ "parts": [{
                "text": "Tell me one surprising or fun fact about the element Iron suitable for a science app for students. Keep it to one or two sentences."
            }] }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_response(&["Fact."])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server);
    assert_eq!(get_fun_fact(&provider, &iron()).await, "Fact.");
}

#[tokio::test]
async fn test_fun_fact_api_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(endpoint(TEXT_MODEL)))
        .respond_with(ResponseTemplate::new(401).set_body_string("API key not valid"))
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server);
    let err = provider.fun_fact(&iron()).await.unwrap_err();
    match err {
        LookupError::Api { status, message } => {
            assert_eq!(status, 401);
            assert!(message.contains("API key not valid"));
        }
        other => panic!("Expected Api error, got {other:?}"),
    }
    assert_eq!(get_fun_fact(&provider, &iron()).await, FUN_FACT_FALLBACK);
}

#[tokio::test]
async fn test_fun_fact_malformed_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(endpoint(TEXT_MODEL)))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server);
    let err = provider.fun_fact(&iron()).await.unwrap_err();
    assert!(matches!(err, LookupError::Parse(_)), "got {err:?}");
}

#[tokio::test]
async fn test_fun_fact_empty_candidates() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(endpoint(TEXT_MODEL)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server);
    assert_eq!(get_fun_fact(&provider, &iron()).await, FUN_FACT_FALLBACK);
}

#[tokio::test]
async fn test_request_timeout_is_network_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(endpoint(TEXT_MODEL)))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(text_response(&["late"]))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&mock_server)
        .await;

    let provider = GeminiProvider::new(
        "test-key".to_string(),
        mock_server.uri(),
        TEXT_MODEL.to_string(),
        IMAGE_MODEL.to_string(),
        Duration::from_millis(50),
    );
    let err = provider.fun_fact(&iron()).await.unwrap_err();
    assert!(matches!(err, LookupError::Network(_)), "got {err:?}");
}

// ============================================================================
// Image Tests
// ============================================================================

#[tokio::test]
async fn test_image_inline_data() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(endpoint(IMAGE_MODEL)))
        .and(header("x-goog-api-key", "test-key"))
        .and(body_partial_json(json!({
            "generationConfig": { "responseModalities": ["IMAGE"] }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{ "content": { "parts": [
                { "text": "Here is your image" },
                { "inlineData": { "mimeType": "image/jpeg", "data": "QUJD" } }
            ] } }]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server);
    assert_eq!(
        get_element_image(&provider, &iron()).await,
        "data:image/jpeg;base64,QUJD"
    );
}

#[tokio::test]
async fn test_image_without_image_part() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(endpoint(IMAGE_MODEL)))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_response(&["I can't draw that."])))
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server);
    assert_eq!(
        provider.element_image(&iron()).await.unwrap_err(),
        LookupError::NoImage
    );
    assert_eq!(get_element_image(&provider, &iron()).await, IMAGE_NO_IMAGE_PART);
}

#[tokio::test]
async fn test_image_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(endpoint(IMAGE_MODEL)))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal error"))
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server);
    assert_eq!(get_element_image(&provider, &iron()).await, IMAGE_FALLBACK);
}

// ============================================================================
// Unconfigured Provider
// ============================================================================

#[tokio::test]
async fn test_unconfigured_fallbacks() {
    let provider = UnconfiguredProvider;
    assert_eq!(get_fun_fact(&provider, &iron()).await, FUN_FACT_NOT_CONFIGURED);
    assert_eq!(get_element_image(&provider, &iron()).await, IMAGE_NOT_CONFIGURED);
}
