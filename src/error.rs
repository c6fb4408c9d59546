use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TableError {
    /// The record list is not a JSON array of records with string
    /// `name`, `device`, `path` and `status` fields.
    #[error("malformed record list: {0}")]
    MalformedInput(#[from] serde_json::Error),

    #[error("row {index} is out of range for a table of {total} rows")]
    RowOutOfRange { index: usize, total: usize },

    #[error("failed to read config file {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config file {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error(transparent)]
    Io(#[from] io::Error),
}
