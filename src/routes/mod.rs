//! API route handlers - maps HTTP endpoints to FTP gateway operations.
//!
//! Each submodule defines routes for a feature area:
//! - `list`: Folder listings, today's processed files, processed CSV rows
//! - `upload`: CSV and spreadsheet uploads into the inbox
//! - `delete`: Single-file and whole-inbox deletion
//! - `client`: Settings for the browser client

pub mod client;
pub mod delete;
pub mod list;
pub mod upload;

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use chrono::{DateTime, FixedOffset, Utc};

use crate::config::FolderLayout;
use crate::error::Result;
use crate::ftp::FtpGateway;

pub struct AppState {
    pub gateway: FtpGateway,
    pub layout: FolderLayout,
    pub utc_offset: FixedOffset,
    pub max_upload_bytes: usize,
    pub clock: fn() -> DateTime<Utc>,
}

pub type SharedState = Arc<AppState>;

pub fn create_router(state: SharedState) -> Router {
    let body_limit = DefaultBodyLimit::max(state.max_upload_bytes);

    Router::new()
        .merge(list::routes(state.clone()))
        .merge(upload::routes(state.clone()).layer(body_limit))
        .merge(delete::routes(state.clone()))
        .merge(client::routes(state))
}

/// Run blocking FTP work off the async executor.
async fn blocking<F, T>(f: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f).await?
}
