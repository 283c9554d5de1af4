//! HTTP handlers
//!
//! Every failure is logged and answered with a generic HTML error page.
//! A batch either completes or produces nothing.

use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
};
use tracing::{error, info};

use super::server::AppState;
use crate::batch::{BatchId, ARCHIVE_NAME};
use crate::error::ReceiptError;

/// Multipart field carrying the spreadsheet
pub const UPLOAD_FIELD: &str = "file";

/// Upload form, with a download link once a batch has completed
pub fn upload_page(download_link: Option<&str>) -> String {
    let mut html = String::from(
        "<!doctype html>\n\
         <title>Upload Excel File</title>\n\
         <h1>Upload Excel to Generate Receipts</h1>\n\
         <form method=post enctype=multipart/form-data>\n  \
         <input type=file name=file><br><br>\n  \
         <input type=submit value=Upload>\n\
         </form>\n",
    );
    if let Some(link) = download_link {
        html.push_str("<h2>Receipts generated successfully.</h2>\n");
        html.push_str(&format!("<a href=\"{}\">Download ZIP</a>\n", link));
    }
    html
}

fn error_page(message: &str) -> String {
    format!(
        "<!doctype html>\n<title>Receipts - Error</title>\n<h1>Something went wrong</h1>\n<p>{}</p>\n<p><a href=\"/\">Back to upload</a></p>\n",
        message
    )
}

/// `ReceiptError` at the HTTP boundary
pub struct AppError(pub ReceiptError);

impl From<ReceiptError> for AppError {
    fn from(e: ReceiptError) -> Self {
        Self(e)
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            ReceiptError::Input(_) => StatusCode::BAD_REQUEST,
            e if e.is_data_error() => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn public_message(&self) -> &'static str {
        match &self.0 {
            ReceiptError::Input(_) => "No spreadsheet was uploaded. Choose a file and try again.",
            e if e.is_data_error() => {
                "The spreadsheet could not be read. Check it has a 'FULL VIEW' sheet with all dues columns."
            }
            _ => "Receipts could not be generated. Please try again later.",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        error!(status = status.as_u16(), "request failed: {}", self.0);
        (status, Html(error_page(self.public_message()))).into_response()
    }
}

/// GET / - upload form
pub async fn index() -> Html<String> {
    Html(upload_page(None))
}

/// GET /health
pub async fn health() -> &'static str {
    "ok"
}

/// POST / - stage the upload, run a batch, link to its archive
pub async fn upload(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Html<String>, AppError> {
    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ReceiptError::Input(format!("malformed upload: {}", e)))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ReceiptError::Input(format!("upload interrupted: {}", e)))?;
        upload = Some((file_name, bytes));
        break;
    }

    let (file_name, bytes) = upload
        .filter(|(name, _)| !name.is_empty())
        .ok_or_else(|| ReceiptError::Input(format!("no '{}' field in upload", UPLOAD_FIELD)))?;

    let worker = Arc::clone(&state);
    let summary = tokio::task::spawn_blocking(move || worker.runner.run_upload(&file_name, &bytes))
        .await
        .map_err(|e| ReceiptError::Io(std::io::Error::other(e.to_string())))??;

    state.set_latest_batch(summary.id);
    info!(batch = %summary.id, receipts = summary.receipt_count(), "upload processed");

    Ok(Html(upload_page(Some(&format!("/download/{}", summary.id)))))
}

/// GET /download - archive of the most recent batch
///
/// Falls back to the newest archive on disk when this process has not run
/// a batch yet.
pub async fn download_latest(State(state): State<Arc<AppState>>) -> Response {
    let latest = match state.latest_batch() {
        Some(id) => Some(id),
        None => {
            let worker = Arc::clone(&state);
            match tokio::task::spawn_blocking(move || worker.runner.newest_batch()).await {
                Ok(Ok(found)) => found,
                Ok(Err(e)) => return AppError(e).into_response(),
                Err(e) => {
                    return AppError(ReceiptError::Io(std::io::Error::other(e.to_string())))
                        .into_response()
                }
            }
        }
    };

    match latest {
        Some(id) => archive_response(&state, id).await,
        None => not_found(),
    }
}

/// GET /download/:batch_id - archive of one batch
pub async fn download_batch(
    State(state): State<Arc<AppState>>,
    Path(batch_id): Path<String>,
) -> Response {
    match batch_id.parse::<BatchId>() {
        Ok(id) => archive_response(&state, id).await,
        Err(e) => AppError(e).into_response(),
    }
}

async fn archive_response(state: &AppState, id: BatchId) -> Response {
    match tokio::fs::read(state.runner.archive_path(id)).await {
        Ok(bytes) => (
            [
                (header::CONTENT_TYPE, "application/zip".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", ARCHIVE_NAME),
                ),
            ],
            bytes,
        )
            .into_response(),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => not_found(),
        Err(e) => AppError(ReceiptError::Io(e)).into_response(),
    }
}

fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Html(error_page("No receipts have been generated yet.")),
    )
        .into_response()
}
