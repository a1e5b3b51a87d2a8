//! FTP connection seam.
//!
//! `FtpConnector` opens one authenticated session per request and
//! `FtpSession` exposes the handful of commands the gateway needs. The
//! production implementation wraps a blocking `suppaftp::FtpStream`; tests
//! swap in an in-memory connector.

use std::io::Cursor;

use suppaftp::FtpStream;
use suppaftp::types::FileType;

use crate::config::FtpConfig;
use crate::error::{AppError, Result};
use crate::ftp::listing::parse_list_line;
use crate::models::FileEntry;

pub trait FtpConnector: Send + Sync {
    fn connect(&self) -> Result<Box<dyn FtpSession>>;
}

/// Blocking FTP commands against one open connection.
pub trait FtpSession: Send {
    /// Non-recursive listing of `path`
    fn list(&mut self, path: &str) -> Result<Vec<FileEntry>>;

    /// Store `data` at `path`, replacing any existing file
    fn put(&mut self, path: &str, data: &[u8]) -> Result<u64>;

    fn remove(&mut self, path: &str) -> Result<()>;

    fn retrieve(&mut self, path: &str) -> Result<Vec<u8>>;

    /// Say goodbye to the server. Safe to call more than once.
    fn close(&mut self);
}

pub struct SuppaConnector {
    config: FtpConfig,
}

impl SuppaConnector {
    pub fn new(config: FtpConfig) -> Self {
        Self { config }
    }
}

impl FtpConnector for SuppaConnector {
    fn connect(&self) -> Result<Box<dyn FtpSession>> {
        let addr = self.config.addr();
        tracing::debug!("Connecting to {}", addr);

        let mut stream = FtpStream::connect(addr.as_str()).map_err(|source| AppError::Connect {
            addr: addr.clone(),
            source,
        })?;

        let session = stream
            .login(self.config.user.as_str(), self.config.password.as_str())
            .and_then(|_| stream.transfer_type(FileType::Binary));
        if let Err(source) = session {
            let _ = stream.quit();
            return Err(AppError::Connect { addr, source });
        }

        Ok(Box::new(SuppaSession {
            stream: Some(stream),
            addr,
        }))
    }
}

struct SuppaSession {
    stream: Option<FtpStream>,
    addr: String,
}

impl SuppaSession {
    fn stream(&mut self) -> Result<&mut FtpStream> {
        self.stream
            .as_mut()
            .ok_or_else(|| AppError::Internal("FTP session already closed".to_string()))
    }
}

impl FtpSession for SuppaSession {
    fn list(&mut self, path: &str) -> Result<Vec<FileEntry>> {
        let lines = self.stream()?.list(Some(path))?;
        Ok(lines.iter().filter_map(|line| parse_list_line(line)).collect())
    }

    fn put(&mut self, path: &str, data: &[u8]) -> Result<u64> {
        let mut reader = Cursor::new(data);
        Ok(self.stream()?.put_file(path, &mut reader)?)
    }

    fn remove(&mut self, path: &str) -> Result<()> {
        Ok(self.stream()?.rm(path)?)
    }

    fn retrieve(&mut self, path: &str) -> Result<Vec<u8>> {
        Ok(self.stream()?.retr_as_buffer(path)?.into_inner())
    }

    fn close(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            if let Err(e) = stream.quit() {
                tracing::debug!("QUIT to {} failed: {}", self.addr, e);
            }
            tracing::debug!("Closed connection to {}", self.addr);
        }
    }
}

impl Drop for SuppaSession {
    fn drop(&mut self) {
        self.close();
    }
}
