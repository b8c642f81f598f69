use ai_content_generator::services::google_ai::{
    ErrorKind, FailureContext, GenerationOptions, GoogleAiClient, GoogleAiConfig,
    MemoryFailureSink, Operation,
};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde_json::{json, Value};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MODEL_PATH: &str = "/models/gemini-1.5-flash:generateContent";
const PNG_BYTES: &[u8] = &[
    0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, b'I', b'H', b'D', b'R',
];

async fn mock_text(server: &MockServer, text: &str) {
    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{"content": {"parts": [{"text": text}]}}]
        })))
        .mount(server)
        .await;
}

fn client_for(server: &MockServer) -> GoogleAiClient {
    let config = GoogleAiConfig::new("test-api-key").with_base_url(server.uri());
    GoogleAiClient::new(config).unwrap()
}

fn write_file(dir: &TempDir, name: &str, bytes: &[u8]) -> std::path::PathBuf {
    let file_path = dir.path().join(name);
    std::fs::write(&file_path, bytes).unwrap();
    file_path
}

async fn single_body(server: &MockServer) -> Value {
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    serde_json::from_slice(&requests[0].body).unwrap()
}

#[tokio::test]
async fn test_image_is_sent_as_inline_data_after_text() {
    let server = MockServer::start().await;
    mock_text(&server, "A cat on a sofa.").await;

    let dir = TempDir::new().unwrap();
    let image_path = write_file(&dir, "cat.png", PNG_BYTES);

    let text = client_for(&server)
        .generate_content_with_image("Describe this image", &image_path, &GenerationOptions::new())
        .await
        .unwrap();
    assert_eq!(text, "A cat on a sofa.");

    let body = single_body(&server).await;
    let parts = body["contents"][0]["parts"].as_array().unwrap();
    assert_eq!(body["contents"][0]["role"], "user");
    assert_eq!(parts.len(), 2);
    assert_eq!(parts[0], json!({"text": "Describe this image"}));
    assert_eq!(
        parts[1],
        json!({"inline_data": {"mime_type": "image/png", "data": STANDARD.encode(PNG_BYTES)}})
    );
    assert_eq!(body["generationConfig"]["topK"], 40);
}

#[tokio::test]
async fn test_unknown_image_type_is_declared_jpeg() {
    let server = MockServer::start().await;
    mock_text(&server, "Something.").await;

    let dir = TempDir::new().unwrap();
    let image_path = write_file(&dir, "capture.bin", b"raw sensor bytes");

    client_for(&server)
        .generate_content_with_image("What is this?", &image_path, &GenerationOptions::new())
        .await
        .unwrap();

    let body = single_body(&server).await;
    assert_eq!(
        body["contents"][0]["parts"][1]["inline_data"]["mime_type"],
        "image/jpeg"
    );
}

#[tokio::test]
async fn test_missing_image_fails_without_request() {
    let server = MockServer::start().await;
    let sink = Arc::new(MemoryFailureSink::new());
    let client = client_for(&server).with_failure_sink(sink.clone());

    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.jpg");
    let options = GenerationOptions::new().with_temperature(0.1);

    let error = client
        .generate_content_with_image("Describe", &missing, &options)
        .await
        .unwrap_err();

    assert_eq!(error.kind(), ErrorKind::ResourceNotFound);
    assert!(server.received_requests().await.unwrap().is_empty());

    let events = sink.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].operation, Operation::GenerateContentWithImage);
    assert_eq!(
        events[0].context,
        FailureContext::Image {
            path: missing.clone(),
            options,
        }
    );
}

#[tokio::test]
async fn test_directory_is_unreadable() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    let error = client_for(&server)
        .generate_content_with_image("Describe", dir.path(), &GenerationOptions::new())
        .await
        .unwrap_err();

    assert_eq!(error.kind(), ErrorKind::ResourceUnreadable);
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_invalid_inputs_fail_before_reading() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    let error = client
        .generate_content_with_image("", Path::new("cat.png"), &GenerationOptions::new())
        .await
        .unwrap_err();
    assert_eq!(error.kind(), ErrorKind::InvalidInput);

    let error = client
        .generate_content_with_image("Describe", "", &GenerationOptions::new())
        .await
        .unwrap_err();
    assert_eq!(error.kind(), ErrorKind::InvalidInput);

    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_image_upstream_error_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_string("image too large"))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let image_path = write_file(&dir, "big.png", PNG_BYTES);

    let error = client_for(&server)
        .generate_content_with_image("Describe", &image_path, &GenerationOptions::new())
        .await
        .unwrap_err();

    assert_eq!(error.kind(), ErrorKind::UpstreamError);
    assert!(error.to_string().contains("image too large"));
}
