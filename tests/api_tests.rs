//! HTTP tests driving the router in-process

mod common;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use common::{bello_row, dues_sheet, write_dues_workbook, write_workbook};
use dues_receipts::api::{router, AppState};
use dues_receipts::config::BatchConfig;
use dues_receipts::writer::OutputFormat;
use http_body_util::BodyExt;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

const BOUNDARY: &str = "receipts-test-boundary";

fn test_app(dir: &Path) -> (Router, Arc<AppState>) {
    let state = Arc::new(AppState::new(BatchConfig {
        upload_dir: dir.join("uploads"),
        output_dir: dir.join("receipts"),
        format: OutputFormat::Text,
        ..BatchConfig::default()
    }));
    (router(Arc::clone(&state)), state)
}

fn multipart_body(field: &str, file_name: &str, bytes: &[u8]) -> Vec<u8> {
    let mut body = format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"{f}\"; filename=\"{n}\"\r\nContent-Type: application/octet-stream\r\n\r\n",
        b = BOUNDARY,
        f = field,
        n = file_name
    )
    .into_bytes();
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
    body
}

fn upload_request(body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8_lossy(&bytes).to_string()
}

fn dues_xlsx(dir: &Path) -> Vec<u8> {
    let path = dir.join("fixture.xlsx");
    write_dues_workbook(&path, vec![bello_row()]);
    std::fs::read(path).unwrap()
}

// ═══════════════════════════════════════════════════════════════════════════
// FORM AND HEALTH
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_index_serves_upload_form() {
    let dir = TempDir::new().unwrap();
    let (app, _) = test_app(dir.path());

    let response = app.oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Upload Excel to Generate Receipts"));
    assert!(html.contains("name=file"));
    assert!(!html.contains("Download ZIP"));
}

#[tokio::test]
async fn test_health() {
    let dir = TempDir::new().unwrap();
    let (app, _) = test_app(dir.path());

    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "ok");
}

// ═══════════════════════════════════════════════════════════════════════════
// UPLOAD
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_upload_then_download() {
    let dir = TempDir::new().unwrap();
    let (app, state) = test_app(dir.path());
    let xlsx = dues_xlsx(dir.path());

    let response = app
        .clone()
        .oneshot(upload_request(multipart_body("file", "dues.xlsx", &xlsx)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Receipts generated successfully."));

    let batch = state.latest_batch().unwrap();
    assert!(html.contains(&format!("/download/{}", batch)));

    let latest = app.clone().oneshot(get("/download")).await.unwrap();
    assert_eq!(latest.status(), StatusCode::OK);
    assert_eq!(latest.headers()[header::CONTENT_TYPE], "application/zip");
    assert_eq!(
        latest.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"all_receipts.zip\""
    );
    let latest_bytes = latest.into_body().collect().await.unwrap().to_bytes();

    let by_id = app
        .oneshot(get(&format!("/download/{}", batch)))
        .await
        .unwrap();
    assert_eq!(by_id.status(), StatusCode::OK);
    let by_id_bytes = by_id.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(latest_bytes, by_id_bytes);

    let archive = zip::ZipArchive::new(std::io::Cursor::new(by_id_bytes.to_vec())).unwrap();
    assert_eq!(archive.len(), 1);
    assert_eq!(archive.file_names().next(), Some("Receipt_12.txt"));
}

#[tokio::test]
async fn test_upload_without_file_field() {
    let dir = TempDir::new().unwrap();
    let (app, state) = test_app(dir.path());
    let xlsx = dues_xlsx(dir.path());

    let response = app
        .oneshot(upload_request(multipart_body("spreadsheet", "dues.xlsx", &xlsx)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(response).await.contains("No spreadsheet was uploaded"));
    assert!(state.latest_batch().is_none());
}

#[tokio::test]
async fn test_upload_with_empty_file_name() {
    let dir = TempDir::new().unwrap();
    let (app, _) = test_app(dir.path());

    let response = app
        .oneshot(upload_request(multipart_body("file", "", b"")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_upload_missing_sheet_is_unprocessable() {
    let dir = TempDir::new().unwrap();
    let (app, state) = test_app(dir.path());
    let path = dir.path().join("wrong.xlsx");
    write_workbook(&path, "Sheet1", &dues_sheet(vec![bello_row()]));
    let xlsx = std::fs::read(&path).unwrap();

    let response = app
        .oneshot(upload_request(multipart_body("file", "wrong.xlsx", &xlsx)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let html = body_text(response).await;
    assert!(html.contains("Something went wrong"));
    assert!(state.latest_batch().is_none());
}

#[tokio::test]
async fn test_upload_corrupt_file_is_unprocessable() {
    let dir = TempDir::new().unwrap();
    let (app, _) = test_app(dir.path());

    let response = app
        .oneshot(upload_request(multipart_body("file", "dues.xlsx", b"garbage")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// ═══════════════════════════════════════════════════════════════════════════
// DOWNLOAD
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_download_before_any_batch() {
    let dir = TempDir::new().unwrap();
    let (app, _) = test_app(dir.path());

    let response = app.oneshot(get("/download")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_download_unknown_batch() {
    let dir = TempDir::new().unwrap();
    let (app, _) = test_app(dir.path());

    let response = app
        .oneshot(get("/download/6f1c0a2e-4b7d-4c1e-9a55-2f0d3c8b9e11"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_download_invalid_batch_id() {
    let dir = TempDir::new().unwrap();
    let (app, _) = test_app(dir.path());

    let response = app.oneshot(get("/download/..%2F..%2Fsecret")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ═══════════════════════════════════════════════════════════════════════════
// STAGED UPLOADS AND RESTARTS
// ═══════════════════════════════════════════════════════════════════════════

fn upload_dir_entries(dir: &Path) -> usize {
    std::fs::read_dir(dir.join("uploads"))
        .map(|entries| entries.count())
        .unwrap_or(0)
}

#[tokio::test]
async fn test_uploads_are_not_kept() {
    let dir = TempDir::new().unwrap();
    let (app, _) = test_app(dir.path());
    let xlsx = dues_xlsx(dir.path());

    let ok = app
        .clone()
        .oneshot(upload_request(multipart_body("file", "dues.xlsx", &xlsx)))
        .await
        .unwrap();
    assert_eq!(ok.status(), StatusCode::OK);
    assert_eq!(upload_dir_entries(dir.path()), 0);

    let failed = app
        .oneshot(upload_request(multipart_body("file", "dues.xlsx", b"garbage")))
        .await
        .unwrap();
    assert_eq!(failed.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(upload_dir_entries(dir.path()), 0);
}

#[tokio::test]
async fn test_download_after_restart_serves_archive_on_disk() {
    let dir = TempDir::new().unwrap();
    let xlsx = dues_xlsx(dir.path());

    let (before, state) = test_app(dir.path());
    let response = before
        .oneshot(upload_request(multipart_body("file", "dues.xlsx", &xlsx)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let batch = state.latest_batch().unwrap();

    let (after, restarted) = test_app(dir.path());
    assert!(restarted.latest_batch().is_none());

    let latest = after.clone().oneshot(get("/download")).await.unwrap();
    assert_eq!(latest.status(), StatusCode::OK);
    let bytes = latest.into_body().collect().await.unwrap().to_bytes();

    let by_id = after
        .oneshot(get(&format!("/download/{}", batch)))
        .await
        .unwrap();
    let by_id_bytes = by_id.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(bytes, by_id_bytes);
}
