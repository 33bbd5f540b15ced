//! HTTP client tests against an in-process stub of the inference service

use axum::{
    body::Bytes,
    extract::State,
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokenlens::client::{InferenceBackend, REQUEST_ID_HEADER};
use tokenlens::{
    messages, ClientError, InferenceClient, Locale, ServerConfig, TextSession, TokenPalette,
};

#[derive(Clone, Default)]
struct Hits {
    llm: Arc<AtomicUsize>,
}

async fn llm(State(hits): State<Hits>, headers: HeaderMap, body: String) -> Response {
    hits.llm.fetch_add(1, Ordering::SeqCst);

    if headers.get(REQUEST_ID_HEADER).is_none() {
        return (StatusCode::BAD_REQUEST, "missing request id").into_response();
    }
    if !body.contains("[MASK]") {
        return (StatusCode::IM_A_TEAPOT, "I'm a teapot").into_response();
    }

    let tokens: Vec<_> = body
        .split_whitespace()
        .enumerate()
        .map(|(i, t)| json!({"id": i + 100, "text": t}))
        .collect();

    Json(json!({
        "tokens": tokens,
        "predictions": [
            {"text": "gatto", "confidence": 21.5},
            {"text": "cane", "confidence": 70.25},
            {"text": "topo", "confidence": 3.0}
        ]
    }))
    .into_response()
}

async fn sketch(headers: HeaderMap, body: Bytes) -> Response {
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("none")
        .to_string();

    Json(json!([{
        "top": [
            {"label": content_type, "conf": 90.0},
            {"label": format!("{} bytes", body.len()), "conf": 10.0}
        ]
    }]))
    .into_response()
}

async fn fail() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, "").into_response()
}

async fn teapot() -> Response {
    (StatusCode::IM_A_TEAPOT, "I'm a teapot").into_response()
}

async fn garbage() -> &'static str {
    "definitely not json"
}

async fn spawn_stub() -> (String, Hits) {
    let hits = Hits::default();
    let app = Router::new()
        .route("/", get(|| async { "ok" }))
        .route("/api/llm", post(llm))
        .route("/api/sketch", post(sketch))
        .route("/api/fail", post(fail))
        .route("/api/garbage", post(garbage))
        .route("/api/teapot", post(teapot))
        .with_state(hits.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), hits)
}

fn client(base_url: &str) -> InferenceClient {
    InferenceClient::new(ServerConfig {
        base_url: base_url.to_string(),
        request_timeout_secs: 5,
        ..Default::default()
    })
    .unwrap()
}

#[tokio::test]
async fn test_predict_masked() {
    let (url, hits) = spawn_stub().await;
    let resp = client(&url).predict_masked("il [MASK] dorme").await.unwrap();

    assert_eq!(hits.llm.load(Ordering::SeqCst), 1);
    assert_eq!(resp.tokens.len(), 3);
    assert_eq!(resp.tokens[1].text, "[MASK]");
    assert_eq!(resp.tokens[1].id, 101);
    assert_eq!(resp.predictions.len(), 3);
}

#[tokio::test]
async fn test_missing_mask_maps_to_418_message() {
    let (url, _) = spawn_stub().await;
    let err = client(&url).predict_masked("niente maschera").await.unwrap_err();

    assert!(matches!(err, ClientError::MissingMask));
    assert_eq!(
        messages::for_error(Locale::It, &err),
        "Il testo deve contenere la maschera [MASK]"
    );
}

#[tokio::test]
async fn test_other_status_is_generic_error() {
    let (url, _) = spawn_stub().await;
    let client = InferenceClient::new(ServerConfig {
        base_url: url,
        llm_path: "/api/fail".to_string(),
        ..Default::default()
    })
    .unwrap();

    let err = client.predict_masked("il [MASK]").await.unwrap_err();
    match &err {
        ClientError::Api { status, message } => {
            assert_eq!(*status, 500);
            assert_eq!(message, "Internal Server Error");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(
        messages::for_error(Locale::En, &err),
        "Unknown error 500 - Internal Server Error"
    );
}

#[tokio::test]
async fn test_invalid_body_is_decode_error() {
    let (url, _) = spawn_stub().await;
    let client = InferenceClient::new(ServerConfig {
        base_url: url,
        llm_path: "/api/garbage".to_string(),
        ..Default::default()
    })
    .unwrap();

    let err = client.predict_masked("il [MASK]").await.unwrap_err();
    assert!(matches!(err, ClientError::Decode(_)));
}

#[tokio::test]
async fn test_classify_sketch_sends_content_type() {
    let (url, _) = spawn_stub().await;
    let labels = client(&url)
        .classify_sketch(vec![0xff, 0xd8, 0xff, 0xe0, 0x00], "image/jpeg")
        .await
        .unwrap();

    assert_eq!(labels.len(), 2);
    assert_eq!(labels[0].label, "image/jpeg");
    assert_eq!(labels[1].label, "5 bytes");
}

#[tokio::test]
async fn test_teapot_from_sketch_endpoint_is_generic_error() {
    let (url, _) = spawn_stub().await;
    let client = InferenceClient::new(ServerConfig {
        base_url: url,
        sketch_path: "/api/teapot".to_string(),
        ..Default::default()
    })
    .unwrap();

    let err = client
        .classify_sketch(vec![0xff, 0xd8, 0xff, 0xe0], "image/jpeg")
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Api { status: 418, .. }));
    assert_eq!(
        messages::for_error(Locale::It, &err),
        "Errore sconosciuto 418 - I'm a teapot"
    );
}

#[tokio::test]
async fn test_unreachable_service() {
    // Bind and release a port so nothing listens on it
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client(&format!("http://{}", addr))
        .predict_masked("il [MASK]")
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Unavailable));
}

#[tokio::test]
async fn test_health_check() {
    let (url, _) = spawn_stub().await;
    assert_eq!(client(&url).health_check().await.unwrap(), 200);
}

#[tokio::test]
async fn test_text_session_over_http() {
    let (url, hits) = spawn_stub().await;
    let mut session = TextSession::new(Arc::new(client(&url)), TokenPalette::with_seed(0.1));

    assert!(session.process_text("").await.unwrap().is_none());
    assert_eq!(hits.llm.load(Ordering::SeqCst), 0);

    let result = session.process_text("il [MASK] il").await.unwrap().unwrap();
    assert_eq!(hits.llm.load(Ordering::SeqCst), 1);
    assert_eq!(result.predictions[0].text, "cane");
    assert_eq!(result.predictions[2].text, "topo");
    assert_eq!(result.tokens[0].color, result.tokens[2].color);
}
