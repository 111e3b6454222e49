//! Cohere client wire-format and error-mapping tests against a mock server

use httpmock::prelude::*;
use serde_json::json;

use pdfchat_rag::config::{CohereConfig, EmbeddingConfig};
use pdfchat_rag::error::Error;
use pdfchat_rag::generation::{CohereClient, InputType};

fn client_for(server: &MockServer) -> CohereClient {
    let cohere = CohereConfig {
        base_url: server.base_url(),
        api_key: Some("test-key".to_string()),
        ..CohereConfig::default()
    };
    CohereClient::new(&cohere, &EmbeddingConfig::default())
}

#[tokio::test]
async fn embed_sends_model_texts_and_input_type() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1/embed")
                .header("authorization", "Bearer test-key")
                .json_body(json!({
                    "model": "embed-english-light-v3.0",
                    "texts": ["hello world"],
                    "input_type": "search_document",
                }));
            then.status(200)
                .json_body(json!({ "embeddings": [[0.5, 1.5, -2.0]] }));
        })
        .await;

    let client = client_for(&server);
    let vectors = client
        .embed(&["hello world".to_string()], InputType::SearchDocument)
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(vectors, vec![vec![0.5, 1.5, -2.0]]);
}

#[tokio::test]
async fn query_embedding_uses_the_query_input_type() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1/embed")
                .json_body_partial(r#"{ "input_type": "search_query" }"#);
            then.status(200).json_body(json!({ "embeddings": [[1.0]] }));
        })
        .await;

    let client = client_for(&server);
    client
        .embed(&["what is x?".to_string()], InputType::SearchQuery)
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn embed_maps_http_failure_to_embedding_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/embed");
            then.status(500).body("internal error");
        })
        .await;

    let client = client_for(&server);
    let err = client
        .embed(&["text".to_string()], InputType::SearchDocument)
        .await
        .unwrap_err();

    match err {
        Error::Embedding(message) => assert!(message.contains("500")),
        other => panic!("expected Embedding, got {other:?}"),
    }
}

#[tokio::test]
async fn embed_rejects_a_short_vector_list() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/embed");
            then.status(200).json_body(json!({ "embeddings": [] }));
        })
        .await;

    let client = client_for(&server);
    let err = client
        .embed(&["text".to_string()], InputType::SearchDocument)
        .await
        .unwrap_err();

    match err {
        Error::Embedding(message) => assert!(message.contains("0 vectors")),
        other => panic!("expected Embedding, got {other:?}"),
    }
}

#[tokio::test]
async fn chat_sends_preamble_and_returns_raw_text() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1/chat")
                .header("authorization", "Bearer test-key")
                .json_body_partial(
                    r#"{ "model": "command-r", "preamble": "answer from context only" }"#,
                );
            then.status(200).json_body(json!({
                "text": "Grounded answer.",
                "generation_id": "gen-1",
            }));
        })
        .await;

    let client = client_for(&server);
    let answer = client
        .chat("Question:\nQ\nContext:ctx\nResponse:\n", "answer from context only")
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(answer, "Grounded answer.");
}

#[tokio::test]
async fn chat_maps_http_failure_to_generation_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/chat");
            then.status(429).body("rate limited");
        })
        .await;

    let client = client_for(&server);
    let err = client.chat("message", "preamble").await.unwrap_err();

    match err {
        Error::Generation(message) => {
            assert!(message.contains("429"));
            assert!(message.contains("rate limited"));
        }
        other => panic!("expected Generation, got {other:?}"),
    }
}

#[tokio::test]
async fn missing_api_key_fails_before_any_request() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/embed");
            then.status(200).json_body(json!({ "embeddings": [[1.0]] }));
        })
        .await;

    let cohere = CohereConfig {
        base_url: server.base_url(),
        api_key: None,
        ..CohereConfig::default()
    };
    let client = CohereClient::new(&cohere, &EmbeddingConfig::default());

    let err = client
        .embed(&["text".to_string()], InputType::SearchDocument)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Config(_)));

    // The credential check happens before the wire
    assert_eq!(mock.hits_async().await, 0);
}
