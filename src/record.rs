use std::io::Read;

use serde::Deserialize;

use crate::error::TableError;

/// Status value that permits a record to be downloaded.
pub const AVAILABLE_STATUS: &str = "available";

/// One row of the table. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Record {
    pub name: String,
    pub device: String,
    pub path: String,
    pub status: String,
}

impl Record {
    pub fn new(
        name: impl Into<String>,
        device: impl Into<String>,
        path: impl Into<String>,
        status: impl Into<String>,
    ) -> Self {
        Record {
            name: name.into(),
            device: device.into(),
            path: path.into(),
            status: status.into(),
        }
    }

    /// Exact, case-sensitive status comparison.
    pub fn has_status(&self, status: &str) -> bool {
        self.status == status
    }
}

/// Parses a JSON array of records. Any shape mismatch fails the whole list.
pub fn parse_records(json: &str) -> Result<Vec<Record>, TableError> {
    serde_json::from_str(json).map_err(TableError::from)
}

pub fn read_records<R: Read>(reader: R) -> Result<Vec<Record>, TableError> {
    serde_json::from_reader(reader).map_err(TableError::from)
}
