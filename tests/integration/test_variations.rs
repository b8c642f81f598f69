use ai_content_generator::services::google_ai::{
    ErrorKind, FailureContext, GenerationDefaults, GoogleAiClient, GoogleAiConfig,
    MemoryFailureSink, Operation,
};
use serde_json::{json, Value};
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MODEL_PATH: &str = "/models/gemini-1.5-flash:generateContent";

fn text_response(text: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "candidates": [{"content": {"parts": [{"text": text}]}}]
    }))
}

/// Mounts one single-use mock per response, so attempts see them in order.
async fn mount_in_order(server: &MockServer, responses: Vec<ResponseTemplate>) {
    for response in responses {
        Mock::given(method("POST"))
            .and(path(MODEL_PATH))
            .respond_with(response)
            .up_to_n_times(1)
            .mount(server)
            .await;
    }
}

fn client_for(server: &MockServer) -> GoogleAiClient {
    let config = GoogleAiConfig::new("test-api-key").with_base_url(server.uri());
    GoogleAiClient::new(config).unwrap()
}

async fn sent_temperatures(server: &MockServer) -> Vec<f64> {
    server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .map(|request| {
            let body: Value = serde_json::from_slice(&request.body).unwrap();
            body["generationConfig"]["temperature"].as_f64().unwrap()
        })
        .collect()
}

fn assert_close(actual: &[f64], expected: &[f64]) {
    assert_eq!(actual.len(), expected.len(), "{actual:?} vs {expected:?}");
    for (a, e) in actual.iter().zip(expected) {
        assert!((a - e).abs() < 1e-5, "{actual:?} vs {expected:?}");
    }
}

#[tokio::test]
async fn test_three_attempts_with_rising_temperature() {
    let server = MockServer::start().await;
    mount_in_order(
        &server,
        vec![text_response("one"), text_response("two"), text_response("three")],
    )
    .await;

    let variations = client_for(&server)
        .generate_variations("Name a coffee shop", 3)
        .await
        .unwrap();

    assert_eq!(variations, vec!["one", "two", "three"]);
    assert_close(&sent_temperatures(&server).await, &[0.7, 0.8, 0.9]);

    let requests = server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["generationConfig"]["maxOutputTokens"], 1024);
    assert_eq!(body["generationConfig"]["topK"], 40);
}

#[tokio::test]
async fn test_base_temperature_comes_from_configured_defaults() {
    let server = MockServer::start().await;
    mount_in_order(&server, vec![text_response("a"), text_response("b")]).await;

    let defaults = GenerationDefaults {
        temperature: 0.2,
        ..GenerationDefaults::default()
    };
    let config = GoogleAiConfig::new("test-api-key")
        .with_base_url(server.uri())
        .with_defaults(defaults);
    let client = GoogleAiClient::new(config).unwrap();

    client.generate_variations("Name a cat", 2).await.unwrap();
    assert_close(&sent_temperatures(&server).await, &[0.2, 0.3]);
}

#[tokio::test]
async fn test_two_of_three_succeed() {
    let server = MockServer::start().await;
    mount_in_order(
        &server,
        vec![
            text_response("first"),
            ResponseTemplate::new(500).set_body_string("internal"),
            text_response("third"),
        ],
    )
    .await;

    let sink = Arc::new(MemoryFailureSink::new());
    let variations = client_for(&server)
        .with_failure_sink(sink.clone())
        .generate_variations("Name a coffee shop", 3)
        .await
        .unwrap();

    assert_eq!(variations, vec!["first", "third"]);
    assert_eq!(server.received_requests().await.unwrap().len(), 3);

    // Only the failed attempt is reported, by the single-shot call.
    let events = sink.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].operation, Operation::GenerateContent);
}

#[tokio::test]
async fn test_all_attempts_fail() {
    let server = MockServer::start().await;
    mount_in_order(
        &server,
        vec![
            ResponseTemplate::new(429).set_body_string("quota one"),
            ResponseTemplate::new(500).set_body_string("quota two"),
            ResponseTemplate::new(503).set_body_string("quota three"),
        ],
    )
    .await;

    let sink = Arc::new(MemoryFailureSink::new());
    let error = client_for(&server)
        .with_failure_sink(sink.clone())
        .generate_variations("Name a coffee shop", 3)
        .await
        .unwrap_err();

    assert_eq!(error.kind(), ErrorKind::AllVariationsFailed);
    let message = error.to_string();
    let one = message.find("quota one").unwrap();
    let two = message.find("quota two").unwrap();
    let three = message.find("quota three").unwrap();
    assert!(one < two && two < three);
    assert!(message.contains("Error generating variation 1: "));
    assert!(message.contains("Error generating variation 3: "));

    let events = sink.events();
    assert_eq!(events.len(), 4);
    assert!(events[..3]
        .iter()
        .all(|event| event.operation == Operation::GenerateContent));
    assert_eq!(events[3].operation, Operation::GenerateVariations);
    assert_eq!(events[3].context, FailureContext::Variations { count: 3 });
}

#[tokio::test]
async fn test_zero_count_is_invalid() {
    let server = MockServer::start().await;
    let error = client_for(&server)
        .generate_variations("Name a coffee shop", 0)
        .await
        .unwrap_err();

    assert_eq!(error.kind(), ErrorKind::InvalidInput);
    assert!(server.received_requests().await.unwrap().is_empty());
}
