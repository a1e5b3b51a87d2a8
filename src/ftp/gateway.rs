//! Gateway operations exposed by the HTTP API.
//!
//! Every operation opens its own connection through the configured
//! `FtpConnector` and closes it before returning, whether the operation
//! succeeded or not. All methods block; call them from `spawn_blocking`.

use std::collections::HashSet;
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::ftp::session::{FtpConnector, FtpSession};
use crate::models::{CsvRow, FileEntry, UploadFile};

#[derive(Clone)]
pub struct FtpGateway {
    connector: Arc<dyn FtpConnector>,
}

impl FtpGateway {
    pub fn new(connector: Arc<dyn FtpConnector>) -> Self {
        Self { connector }
    }

    fn with_session<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut dyn FtpSession) -> Result<T>,
    {
        let mut session = self.connector.connect()?;
        let result = f(session.as_mut());
        session.close();
        result
    }

    pub fn list_folder(&self, dir: &str) -> Result<Vec<FileEntry>> {
        self.with_session(|session| {
            let entries = session.list(dir)?;
            tracing::info!("Listed {} entries in {}", entries.len(), dir);
            Ok(entries)
        })
    }

    /// Upload `files` into `dir` in order, stopping at the first failure.
    ///
    /// The whole batch is validated before connecting, so an invalid file
    /// means nothing is uploaded.
    pub fn upload_files(&self, dir: &str, files: &[UploadFile]) -> Result<()> {
        validate_csv_batch(files)?;

        self.with_session(|session| {
            for file in files {
                let path = remote_path(dir, &file.name);
                tracing::info!("Uploading {} to {}", file.name, path);
                let written = session.put(&path, &file.bytes)?;
                tracing::info!("Uploaded {} ({} bytes)", file.name, written);
            }
            Ok(())
        })
    }

    pub fn delete_file(&self, dir: &str, name: &str) -> Result<()> {
        validate_file_name(name)?;

        self.with_session(|session| {
            let path = remote_path(dir, name);
            session.remove(&path)?;
            tracing::info!("Deleted {}", path);
            Ok(())
        })
    }

    /// Delete every non-directory entry of `dir`, returning how many went.
    ///
    /// Stops at the first failure; files deleted before it stay deleted.
    pub fn delete_all_in_folder(&self, dir: &str) -> Result<usize> {
        self.with_session(|session| {
            let entries = session.list(dir)?;
            let mut deleted = 0;
            for entry in entries.iter().filter(|e| !e.is_directory) {
                session.remove(&remote_path(dir, &entry.name))?;
                tracing::info!("Deleted {}", entry.name);
                deleted += 1;
            }
            tracing::info!("Deleted {} files from {}", deleted, dir);
            Ok(deleted)
        })
    }

    /// Parse every `.csv` file of `dir` and return all rows, file by file in
    /// listing order.
    pub fn read_csv_files(&self, dir: &str) -> Result<Vec<CsvRow>> {
        self.with_session(|session| {
            let entries = session.list(dir)?;
            let mut rows = Vec::new();
            for entry in entries.iter().filter(|e| !e.is_directory && e.name.ends_with(".csv")) {
                let data = session.retrieve(&remote_path(dir, &entry.name))?;
                let parsed = parse_csv(&data)?;
                tracing::info!("Read {} rows from {}", parsed.len(), entry.name);
                rows.extend(parsed);
            }
            Ok(rows)
        })
    }
}

pub fn remote_path(dir: &str, name: &str) -> String {
    format!("{}/{}", dir.trim_end_matches('/'), name)
}

fn validate_file_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(AppError::Validation("Filename is required.".to_string()));
    }
    if name.contains('/') || name.contains('\\') || name == "." || name == ".." {
        return Err(AppError::Validation(format!("Invalid filename: {}", name)));
    }
    Ok(())
}

fn validate_csv_batch(files: &[UploadFile]) -> Result<()> {
    if files.is_empty() || !files.iter().all(|f| f.name.ends_with(".csv")) {
        return Err(AppError::Validation("Please upload valid CSV files.".to_string()));
    }
    files.iter().try_for_each(|f| validate_file_name(&f.name))?;

    let mut seen = HashSet::new();
    match files.iter().find(|f| !seen.insert(f.name.as_str())) {
        Some(dup) => Err(AppError::Validation(format!("Duplicate filename in upload: {}", dup.name))),
        None => Ok(()),
    }
}

/// Header row becomes the keys of every following row. Short rows only get
/// the columns they have; extra cells beyond the header are ignored. Bytes
/// that are not UTF-8 (legacy Excel exports) are decoded lossily.
pub fn parse_csv(data: &[u8]) -> Result<Vec<CsvRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(data);
    let headers: Vec<String> = reader
        .byte_headers()?
        .iter()
        .map(|h| String::from_utf8_lossy(h).into_owned())
        .collect();

    let mut rows = Vec::new();
    for record in reader.byte_records() {
        let record = record?;
        let row: CsvRow = headers
            .iter()
            .zip(record.iter())
            .map(|(key, value)| (key.clone(), String::from_utf8_lossy(value).into()))
            .collect();
        rows.push(row);
    }
    Ok(rows)
}
