//! HTTP-level tests for the Hugging Face client against a mock server.

use secrecy::SecretString;
use serde_json::json;
use spacebio_config::InferenceSettings;
use spacebio_inference::{HfInferenceClient, Inference, InferenceError};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const EMBED_PATH: &str = "/embeddings/sentence-transformers/all-MiniLM-L6-v2";
const SUMMARY_PATH: &str = "/models/facebook/bart-large-cnn";

fn client_for(server: &MockServer) -> HfInferenceClient {
    let settings = InferenceSettings {
        api_key: SecretString::from("hf_test_key".to_string()),
        base_url: format!("{}/", server.uri()),
        embed_model: "sentence-transformers/all-MiniLM-L6-v2".to_string(),
        summary_model: "facebook/bart-large-cnn".to_string(),
        summary_max_length: 120,
    };
    HfInferenceClient::new(&settings).expect("client")
}

#[tokio::test]
async fn test_embed_posts_inputs_with_bearer_key() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(EMBED_PATH))
        .and(header("authorization", "Bearer hf_test_key"))
        .and(body_json(json!({"inputs": "Spaceflight alters gene expression"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"embedding": [0.1, 0.2, 0.3]})))
        .expect(1)
        .mount(&server)
        .await;

    let embedding = client_for(&server)
        .embed("Spaceflight alters gene expression")
        .await
        .unwrap();

    assert_eq!(embedding, vec![0.1, 0.2, 0.3]);
}

#[tokio::test]
async fn test_embed_accepts_list_shape() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(EMBED_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"embedding": [1.0, 2.0]}])))
        .mount(&server)
        .await;

    assert_eq!(client_for(&server).embed("x").await.unwrap(), vec![1.0, 2.0]);
}

#[tokio::test]
async fn test_embed_unexpected_shape_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(EMBED_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"vectors": []})))
        .mount(&server)
        .await;

    let err = client_for(&server).embed("x").await.unwrap_err();
    assert!(matches!(err, InferenceError::UnexpectedResponse(_)));
}

#[tokio::test]
async fn test_http_failure_is_propagated_without_retry() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(EMBED_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_string("Model is currently loading"))
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&server).embed("x").await.unwrap_err();
    match err {
        InferenceError::Status { status, body } => {
            assert_eq!(status, 503);
            assert_eq!(body, "Model is currently loading");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_summarize_sends_length_hint() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SUMMARY_PATH))
        .and(body_json(json!({
            "inputs": "Long abstract text",
            "parameters": {"max_length": 60},
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{"summary_text": "Short summary."}])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let summary = client_for(&server).summarize("Long abstract text", 60).await.unwrap();
    assert_eq!(summary, "Short summary.");
}

#[tokio::test]
async fn test_summarize_stringifies_unknown_shape() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SUMMARY_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"estimated_time": 20.0})))
        .mount(&server)
        .await;

    let summary = client_for(&server).summarize("text", 120).await.unwrap();
    assert_eq!(summary, r#"{"estimated_time":20.0}"#);
}
