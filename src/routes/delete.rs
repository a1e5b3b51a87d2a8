//! Inbox deletion endpoints.
//!
//! - DELETE /delete/file/{filename}
//!   Removes one file from the inbox. Missing files are an error.
//!
//! - DELETE /delete/all/dhl
//!   Removes every file (not directory) from the inbox.
//!   Used by: "Clear folder" button

use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    routing::delete,
};

use super::{SharedState, blocking};
use crate::error::{AppError, Result};

pub fn routes(state: SharedState) -> Router {
    Router::new()
        .route("/delete/file", delete(missing_filename))
        .route("/delete/file/", delete(missing_filename))
        .route("/delete/file/{filename}", delete(delete_file))
        .route("/delete/all/dhl", delete(delete_all))
        .with_state(state)
}

async fn missing_filename() -> Result<(StatusCode, &'static str)> {
    Err(AppError::Validation("Filename is required.".to_string()))
}

async fn delete_file(
    State(state): State<SharedState>,
    Path(filename): Path<String>,
) -> Result<(StatusCode, &'static str)> {
    let gateway = state.gateway.clone();
    let dir = state.layout.inbox.clone();

    blocking(move || gateway.delete_file(&dir, &filename)).await?;
    Ok((StatusCode::OK, "File deleted successfully."))
}

async fn delete_all(State(state): State<SharedState>) -> Result<(StatusCode, &'static str)> {
    let gateway = state.gateway.clone();
    let dir = state.layout.inbox.clone();

    blocking(move || gateway.delete_all_in_folder(&dir)).await?;
    Ok((StatusCode::OK, "All files deleted successfully."))
}
