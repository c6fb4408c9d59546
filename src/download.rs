use std::collections::BTreeSet;
use std::fmt;
use std::io::Write;

use crate::record::Record;

pub const NOTHING_VALID_MESSAGE: &str = "Select a valid file to download";
pub const DOWNLOADING_HEADER: &str = "Downloading the following:";

/// A `(path, device)` pair handed to whatever performs the transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadItem {
    pub path: String,
    pub device: String,
}

impl fmt::Display for DownloadItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}--{}", self.path, self.device)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    Items(Vec<DownloadItem>),
    NothingValid,
}

impl DownloadOutcome {
    pub fn items(&self) -> &[DownloadItem] {
        match self {
            DownloadOutcome::Items(items) => items,
            DownloadOutcome::NothingValid => &[],
        }
    }

    pub fn is_nothing_valid(&self) -> bool {
        matches!(self, DownloadOutcome::NothingValid)
    }

    /// Text shown to the user, one item per line.
    pub fn message(&self) -> String {
        match self {
            DownloadOutcome::Items(items) => {
                let mut message = String::from(DOWNLOADING_HEADER);
                for item in items {
                    message.push('\n');
                    message.push_str(&item.to_string());
                }
                message
            }
            DownloadOutcome::NothingValid => NOTHING_VALID_MESSAGE.to_string(),
        }
    }
}

/// Scans rows in display order and keeps the selected rows whose status is
/// `available_status`. Selected rows with any other status are dropped.
pub fn collect_downloadable(
    records: &[Record],
    selected: &BTreeSet<usize>,
    available_status: &str,
) -> DownloadOutcome {
    let items: Vec<DownloadItem> = records
        .iter()
        .enumerate()
        .filter(|(idx, record)| selected.contains(idx) && record.has_status(available_status))
        .map(|(_, record)| DownloadItem {
            path: record.path.clone(),
            device: record.device.clone(),
        })
        .collect();

    if items.is_empty() {
        DownloadOutcome::NothingValid
    } else {
        DownloadOutcome::Items(items)
    }
}

/// Writes the hand-off list, one `path--device` per line.
pub fn write_download_list<W: Write>(mut writer: W, items: &[DownloadItem]) -> std::io::Result<()> {
    for item in items {
        writeln!(writer, "{}", item)?;
    }
    writer.flush()
}
