//! FTP access.
//!
//! - `session`: `FtpConnector`/`FtpSession` traits and the suppaftp-backed
//!   implementation
//! - `listing`: LIST output line → `FileEntry`
//! - `gateway`: the operations the HTTP API exposes, one connection each

pub mod gateway;
pub mod listing;
pub mod session;

#[cfg(test)]
pub mod fake;

pub use gateway::FtpGateway;
pub use session::SuppaConnector;
