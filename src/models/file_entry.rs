//! Remote listing DTO.
//!
//! `FileEntry` is what every listing endpoint returns for one remote file or
//! directory. `dateModified` is rendered like `2024-06-14T03:00:00.000Z`, or
//! as the `"unavailable"` sentinel when the server gave no usable date.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};

pub const DATE_UNAVAILABLE: &str = "unavailable";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileEntry {
    pub name: String,
    pub size: u64,
    pub is_directory: bool,
    #[serde(serialize_with = "serialize_date_modified")]
    pub date_modified: Option<DateTime<Utc>>,
}

fn serialize_date_modified<S>(date: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match date {
        Some(d) => serializer.serialize_str(&d.to_rfc3339_opts(SecondsFormat::Millis, true)),
        None => serializer.serialize_str(DATE_UNAVAILABLE),
    }
}
