//! Application error types and HTTP response mapping.
//!
//! Defines `AppError` enum for all error conditions and implements Axum's
//! `IntoResponse` to convert errors to plain-text HTTP responses.
//!
//! Error mappings:
//! - `Validation`, `Spreadsheet` → 400
//! - `Connect`, `Ftp`, `Csv`, `Internal` → 500

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Failed to connect to FTP server {addr}: {source}")]
    Connect {
        addr: String,
        #[source]
        source: suppaftp::FtpError,
    },

    #[error("FTP error: {0}")]
    Ftp(#[from] suppaftp::FtpError),

    #[error("{0}")]
    Validation(String),

    #[error("Invalid CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid spreadsheet: {0}")]
    Spreadsheet(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::Spreadsheet(_) => StatusCode::BAD_REQUEST,
            AppError::Connect { .. }
            | AppError::Ftp(_)
            | AppError::Csv(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<calamine::Error> for AppError {
    fn from(e: calamine::Error) -> Self {
        AppError::Spreadsheet(e.to_string())
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(e: tokio::task::JoinError) -> Self {
        AppError::Internal(format!("FTP task failed: {}", e))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{}", self);
        } else {
            tracing::warn!("{}", self);
        }

        (status, self.to_string()).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
