//! Router tests with a stub predictor.

#![allow(clippy::unwrap_used)]

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use shroomscan::catalog::{Catalog, InfoCatalog, PriceTable};
use shroomscan::config::Config;
use shroomscan::inference::{LabelPredictor, Prediction, PredictionKind};
use shroomscan::web::{AppState, build_router};
use shroomscan::{Error, Result};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

const BOUNDARY: &str = "shroomscan-test-boundary";

enum Stub {
    Label(&'static str),
    Nothing,
    Fails,
}

impl LabelPredictor for Stub {
    fn predict(&self, image: &Path) -> Result<Option<Prediction>> {
        assert!(image.exists(), "upload should be on disk before predicting");
        match self {
            Self::Label(label) => Ok(Some(Prediction {
                label: (*label).to_string(),
                class_index: 0,
                confidence: 0.91,
                kind: PredictionKind::Classification,
            })),
            Self::Nothing => Ok(None),
            Self::Fails => Err(Error::Inference {
                reason: "tensor exploded".to_string(),
            }),
        }
    }
}

fn state(predictor: Option<Stub>, upload_dir: &Path) -> AppState {
    let mut config = Config::default();
    config.server.upload_dir = upload_dir.to_path_buf();
    let catalog = Catalog::new(InfoCatalog::default(), PriceTable::builtin());
    let predictor = predictor.map(|p| Arc::new(p) as Arc<dyn LabelPredictor>);
    AppState::new(predictor, catalog, &config)
}

/// Multipart body with optional file part and text fields.
fn multipart(file: Option<(&str, &[u8])>, fields: &[(&str, &str)]) -> Vec<u8> {
    let mut body = Vec::new();
    if let Some((name, bytes)) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; \
                 filename=\"{name}\"\r\nContent-Type: image/jpeg\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn post(uri: &str, body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn test_index_renders_form() {
    let dir = TempDir::new().unwrap();
    let app = build_router(state(Some(Stub::Nothing), dir.path()));

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
    assert!(content_type.starts_with("text/html"));
    let html = body_text(response).await;
    assert!(html.contains("enctype=\"multipart/form-data\""));
    assert!(!html.contains("class=\"warning\""));
}

#[tokio::test]
async fn test_post_without_file() {
    let dir = TempDir::new().unwrap();
    let app = build_router(state(Some(Stub::Nothing), dir.path()));

    let response = app
        .oneshot(post("/", multipart(None, &[("month", "Jan")])))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("No file uploaded!"));
}

#[tokio::test]
async fn test_file_field_without_filename_is_not_an_upload() {
    let dir = TempDir::new().unwrap();
    let app = build_router(state(Some(Stub::Nothing), dir.path()));

    let response = app
        .oneshot(post("/", multipart(None, &[("file", "just text")])))
        .await
        .unwrap();

    assert!(body_text(response).await.contains("No file uploaded!"));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_upload_over_limit_is_rejected() {
    let dir = TempDir::new().unwrap();
    let mut state = state(Some(Stub::Label("oyster_mushroom")), dir.path());
    state.max_upload_bytes = 1024;
    let app = build_router(state);

    let response = app
        .oneshot(post("/", multipart(Some(("big.jpg", &[0_u8; 10_000][..])), &[])))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_upload_under_limit_is_accepted() {
    let dir = TempDir::new().unwrap();
    let mut state = state(Some(Stub::Label("oyster_mushroom")), dir.path());
    state.max_upload_bytes = 1024;
    let app = build_router(state);

    let response = app
        .oneshot(post("/", multipart(Some(("small.jpg", &[0_u8; 200][..])), &[])))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("<h2>Oyster Mushroom</h2>"));
}

#[tokio::test]
async fn test_post_with_empty_filename() {
    let dir = TempDir::new().unwrap();
    let app = build_router(state(Some(Stub::Nothing), dir.path()));

    let response = app
        .oneshot(post("/", multipart(Some(("", b"")), &[])))
        .await
        .unwrap();

    assert!(body_text(response).await.contains("No file selected!"));
}

#[tokio::test]
async fn test_post_without_model() {
    let dir = TempDir::new().unwrap();
    let app = build_router(state(None, dir.path()));

    let response = app
        .oneshot(post("/", multipart(Some(("cap.jpg", b"jpeg")), &[])))
        .await
        .unwrap();

    let html = body_text(response).await;
    assert!(html.contains("Model not loaded."));
    assert!(html.contains("class=\"warning\""));
    // Upload is kept even without a model.
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[tokio::test]
async fn test_post_shows_result_and_price() {
    let dir = TempDir::new().unwrap();
    let app = build_router(state(Some(Stub::Label("oyster_mushroom")), dir.path()));

    let response = app
        .oneshot(post(
            "/",
            multipart(Some(("../oyster cap.jpg", b"jpeg")), &[("month", "Mar")]),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("<h2>Oyster Mushroom</h2>"));
    assert!(html.contains("src=\"/uploads/"));
    assert!(html.contains("oyster_cap.jpg"));
    assert!(!html.contains("class=\"error\""));

    let saved: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().into_string().unwrap())
        .collect();
    assert_eq!(saved.len(), 1);
    assert!(saved[0].ends_with("_oyster_cap.jpg"));
}

#[tokio::test]
async fn test_post_no_confident_prediction() {
    let dir = TempDir::new().unwrap();
    let app = build_router(state(Some(Stub::Nothing), dir.path()));

    let response = app
        .oneshot(post("/", multipart(Some(("cap.jpg", b"jpeg")), &[])))
        .await
        .unwrap();

    assert!(
        body_text(response)
            .await
            .contains("No mushroom detected with high confidence.")
    );
}

#[tokio::test]
async fn test_post_prediction_error() {
    let dir = TempDir::new().unwrap();
    let app = build_router(state(Some(Stub::Fails), dir.path()));

    let response = app
        .oneshot(post("/", multipart(Some(("cap.jpg", b"jpeg")), &[])))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Prediction error: inference failed: tensor exploded"));
}

#[tokio::test]
async fn test_api_predict_json() {
    let dir = TempDir::new().unwrap();
    let app = build_router(state(Some(Stub::Label("morel_mushrooms")), dir.path()));

    let response = app
        .oneshot(post(
            "/api/predict",
            multipart(
                Some(("morel.png", b"png")),
                &[("month", "October"), ("lang", "hi")],
            ),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(json["model_loaded"], true);
    assert_eq!(json["language"], "hi");
    assert_eq!(json["prediction"]["label"], "morel_mushrooms");
    assert_eq!(json["result"]["canonical_name"], "Morel Mushroom");
    assert_eq!(json["result"]["month"], "Oct");
    assert_eq!(json["result"]["price"], "16500–20500");
    assert!(json["error"].is_null());
}

#[tokio::test]
async fn test_saved_upload_is_served() {
    let dir = TempDir::new().unwrap();
    let app = build_router(state(None, dir.path()));

    let response = app
        .clone()
        .oneshot(post("/api/predict", multipart(Some(("a.jpg", b"pixels")), &[])))
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    let image = json["image"].as_str().unwrap().to_string();
    assert!(image.starts_with("/uploads/"));

    let response = app
        .oneshot(Request::builder().uri(&image).body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "pixels");
}

#[tokio::test]
async fn test_health() {
    let dir = TempDir::new().unwrap();
    let app = build_router(state(None, dir.path()));

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["service"], "shroomscan");
    assert_eq!(json["model_loaded"], false);
}
