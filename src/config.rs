//! Startup configuration.
//!
//! The CLI (flags or environment variables) is parsed once in `main` and
//! turned into an `AppConfig` that is handed to the router state. Nothing
//! here is mutated after startup.

use std::fmt;

use chrono::FixedOffset;
use clap::Parser;

use crate::error::{AppError, Result};

/// FTP Gateway - Push CSV files to a partner's FTP inbox from the browser
#[derive(Parser, Debug)]
#[command(name = "ftp-gateway")]
#[command(about = "HTTP gateway and browser client for a partner's FTP inbox", long_about = None)]
pub struct Cli {
    /// FTP server host name
    #[arg(long, env = "FTP_HOST")]
    pub ftp_host: String,

    /// FTP server port
    #[arg(long, env = "FTP_PORT", default_value_t = 21)]
    pub ftp_port: u16,

    /// FTP user name
    #[arg(long, env = "FTP_USER", default_value = "anonymous")]
    pub ftp_user: String,

    /// FTP password
    #[arg(long, env = "FTP_PASSWORD", default_value = "", hide_env_values = true)]
    pub ftp_password: String,

    /// Remote folder uploads are written to
    #[arg(long, env = "FTP_INBOX_DIR", default_value = "/DHL")]
    pub inbox_dir: String,

    /// Remote folder the partner moves imported files to
    #[arg(long, env = "FTP_PROCESSED_DIR", default_value = "/DHL/importacao/Processados")]
    pub processed_dir: String,

    /// Fixed UTC offset, in hours, that defines "today"
    #[arg(long, env = "UTC_OFFSET_HOURS", default_value_t = -3, allow_negative_numbers = true)]
    pub utc_offset_hours: i32,

    /// Address to bind the HTTP server to
    #[arg(long, env = "BIND_ADDR", default_value = "127.0.0.1")]
    pub bind: String,

    /// Port to run the server on
    #[arg(short, long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Largest accepted upload request body, in bytes
    #[arg(long, env = "MAX_UPLOAD_BYTES", default_value_t = 25 * 1024 * 1024)]
    pub max_upload_bytes: usize,

    /// Open browser automatically after starting
    #[arg(short, long)]
    pub open: bool,
}

#[derive(Clone)]
pub struct FtpConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
}

impl FtpConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl fmt::Debug for FtpConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FtpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Remote directory layout
#[derive(Debug, Clone)]
pub struct FolderLayout {
    pub inbox: String,
    pub processed: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub ftp: FtpConfig,
    pub layout: FolderLayout,
    pub utc_offset: FixedOffset,
    pub max_upload_bytes: usize,
}

impl Cli {
    pub fn app_config(&self) -> Result<AppConfig> {
        Ok(AppConfig {
            ftp: FtpConfig {
                host: self.ftp_host.clone(),
                port: self.ftp_port,
                user: self.ftp_user.clone(),
                password: self.ftp_password.clone(),
            },
            layout: FolderLayout {
                inbox: self.inbox_dir.clone(),
                processed: self.processed_dir.clone(),
            },
            utc_offset: offset_from_hours(self.utc_offset_hours)?,
            max_upload_bytes: self.max_upload_bytes,
        })
    }
}

pub fn offset_from_hours(hours: i32) -> Result<FixedOffset> {
    hours
        .checked_mul(3600)
        .and_then(FixedOffset::east_opt)
        .ok_or_else(|| AppError::Validation(format!("UTC offset out of range: {} hours", hours)))
}
