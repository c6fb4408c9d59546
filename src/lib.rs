//! Checkbox-driven selection table over a fixed list of file records.
//!
//! The headless core ([`TabularData`]) owns the selection state and is driven
//! through [`TabularData::dispatch`]. The [`tui`] module projects that state
//! onto a terminal table and maps keyboard and mouse input onto
//! [`TableEvent`]s.

pub mod cli;
pub mod clipboard;
pub mod config;
pub mod download;
pub mod error;
pub mod logging;
pub mod record;
pub mod selection;
pub mod table_text;
pub mod tui;
pub mod utils;
pub mod workflow;

pub use download::{DownloadItem, DownloadOutcome};
pub use error::TableError;
pub use record::Record;
pub use selection::{SelectionState, SelectionSummary, TableEvent, TabularData};
