//! Data transfer objects (DTOs) for API requests and responses.
//!
//! - `file_entry`: FileEntry, the normalized listing record
//! - `upload`: UploadFile taken from one multipart field
//! - `csv_row`: CsvRow, one parsed row of a remote CSV file

pub mod csv_row;
pub mod file_entry;
pub mod upload;

pub use csv_row::*;
pub use file_entry::*;
pub use upload::*;
