use serde_json::{Map, Value};

/// One data row of a remote CSV file, keyed by that file's header row.
pub type CsvRow = Map<String, Value>;
