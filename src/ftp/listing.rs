//! LIST output parsing.
//!
//! Lines are parsed with suppaftp's POSIX/DOS listing parser, which rejects
//! any line whose date does not parse; such lines are skipped with a warning.
//! A line that parses but carries the Unix epoch as its date gets `None`, so
//! the entry still shows up in listings without a date.

use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Utc};
use suppaftp::list::File;

use crate::models::FileEntry;

pub fn parse_list_line(line: &str) -> Option<FileEntry> {
    match File::from_str(line) {
        Ok(file) => Some(FileEntry {
            name: file.name().to_string(),
            size: file.size() as u64,
            is_directory: file.is_directory(),
            date_modified: modified_at(file.modified()),
        }),
        Err(e) => {
            tracing::warn!("Skipping unparseable listing line {:?}: {}", line, e);
            None
        }
    }
}

fn modified_at(time: SystemTime) -> Option<DateTime<Utc>> {
    if time <= UNIX_EPOCH {
        return None;
    }
    Some(DateTime::<Utc>::from(time))
}
