//! Folder listing endpoints.
//!
//! - GET /list/files/recents, GET /list/files/dhl
//!   Inbox contents, minus the partner's bookkeeping folders.
//!   Used by: "Recent Files" list and the delete dropdown
//!
//! - GET /list/files/processados
//!   Processed folder contents.
//!
//! - GET /list/files/processados/today
//!   Processed files modified today in the configured UTC offset.
//!   Used by: "Processed Today" list
//!
//! - GET /list/files/processados/csv
//!   Rows of every CSV in the processed folder, concatenated.

use axum::{Json, Router, extract::State, routing::get};

use super::{SharedState, blocking};
use crate::day_window::{DayWindow, modified_within};
use crate::error::Result;
use crate::models::{CsvRow, FileEntry};

/// Inbox entries the partner's system owns; never shown as uploads.
const HIDDEN_INBOX_ENTRIES: [&str; 3] = ["Erros", "Processados", "padrao_2"];

pub fn routes(state: SharedState) -> Router {
    Router::new()
        .route("/list/files/recents", get(list_inbox))
        .route("/list/files/dhl", get(list_inbox))
        .route("/list/files/processados", get(list_processed))
        .route("/list/files/processados/today", get(list_processed_today))
        .route("/list/files/processados/csv", get(read_processed_csv))
        .with_state(state)
}

async fn list_inbox(State(state): State<SharedState>) -> Result<Json<Vec<FileEntry>>> {
    let gateway = state.gateway.clone();
    let dir = state.layout.inbox.clone();
    let entries = blocking(move || gateway.list_folder(&dir)).await?;

    Ok(Json(
        entries
            .into_iter()
            .filter(|e| !HIDDEN_INBOX_ENTRIES.contains(&e.name.as_str()))
            .collect(),
    ))
}

async fn list_processed(State(state): State<SharedState>) -> Result<Json<Vec<FileEntry>>> {
    let gateway = state.gateway.clone();
    let dir = state.layout.processed.clone();
    Ok(Json(blocking(move || gateway.list_folder(&dir)).await?))
}

async fn list_processed_today(State(state): State<SharedState>) -> Result<Json<Vec<FileEntry>>> {
    let gateway = state.gateway.clone();
    let dir = state.layout.processed.clone();
    let entries = blocking(move || gateway.list_folder(&dir)).await?;

    let window = DayWindow::containing((state.clock)(), state.utc_offset);
    Ok(Json(modified_within(entries, &window)))
}

async fn read_processed_csv(State(state): State<SharedState>) -> Result<Json<Vec<CsvRow>>> {
    let gateway = state.gateway.clone();
    let dir = state.layout.processed.clone();
    Ok(Json(blocking(move || gateway.read_csv_files(&dir)).await?))
}
