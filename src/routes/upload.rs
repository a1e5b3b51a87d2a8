//! Upload endpoints. Both read multipart field `files` (repeatable).
//!
//! - POST /upload/csv
//!   Uploads the CSV files as-is into the inbox. 400 if any is not `.csv`.
//!
//! - POST /upload/spreadsheet
//!   Converts each workbook's first sheet to CSV, then uploads the batch.
//!   Used by: the upload form of the browser client

use axum::{
    Router,
    extract::{Multipart, State},
    http::StatusCode,
    routing::post,
};

use super::{SharedState, blocking};
use crate::convert::convert_batch;
use crate::error::{AppError, Result};
use crate::models::UploadFile;

const FILES_FIELD: &str = "files";

pub fn routes(state: SharedState) -> Router {
    Router::new()
        .route("/upload/csv", post(upload_csv))
        .route("/upload/spreadsheet", post(upload_spreadsheet))
        .with_state(state)
}

async fn read_files(mut multipart: Multipart) -> Result<Vec<UploadFile>> {
    let mut files = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid upload: {}", e)))?
    {
        if field.name() != Some(FILES_FIELD) {
            continue;
        }
        let name = field.file_name().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Invalid upload: {}", e)))?;
        files.push(UploadFile::new(name, bytes.to_vec()));
    }

    tracing::info!(
        "Received files: {:?}",
        files.iter().map(|f| f.name.as_str()).collect::<Vec<_>>()
    );
    Ok(files)
}

async fn upload_csv(
    State(state): State<SharedState>,
    multipart: Multipart,
) -> Result<(StatusCode, &'static str)> {
    let files = read_files(multipart).await?;
    let gateway = state.gateway.clone();
    let dir = state.layout.inbox.clone();

    blocking(move || gateway.upload_files(&dir, &files)).await?;
    Ok((StatusCode::OK, "Files uploaded successfully."))
}

async fn upload_spreadsheet(
    State(state): State<SharedState>,
    multipart: Multipart,
) -> Result<(StatusCode, &'static str)> {
    let files = read_files(multipart).await?;
    if files.is_empty() {
        return Err(AppError::Validation("Please upload spreadsheet files.".to_string()));
    }
    let gateway = state.gateway.clone();
    let dir = state.layout.inbox.clone();

    blocking(move || {
        let converted = convert_batch(&files)?;
        gateway.upload_files(&dir, &converted)
    })
    .await?;
    Ok((StatusCode::OK, "Files uploaded successfully."))
}
