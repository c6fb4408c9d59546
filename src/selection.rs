use std::collections::BTreeSet;
use std::fmt;

use tracing::{debug, info};

use crate::download::{self, DownloadOutcome};
use crate::error::TableError;
use crate::record::{self, AVAILABLE_STATUS, Record};

/// Tri-state of the "select all" control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    NotSelected,
    PartiallySelected,
    FullySelected,
}

impl SelectionState {
    /// An empty table is never "fully selected": the control stays unchecked
    /// and non-indeterminate when there is nothing beneath it.
    pub fn from_counts(selected: usize, total: usize) -> Self {
        if total > 0 && selected == total {
            SelectionState::FullySelected
        } else if selected > 0 {
            SelectionState::PartiallySelected
        } else {
            SelectionState::NotSelected
        }
    }

    pub fn is_checked(self) -> bool {
        self == SelectionState::FullySelected
    }

    pub fn is_indeterminate(self) -> bool {
        self == SelectionState::PartiallySelected
    }

    pub fn glyph(self) -> &'static str {
        match self {
            SelectionState::NotSelected => "[ ]",
            SelectionState::PartiallySelected => "[-]",
            SelectionState::FullySelected => "[x]",
        }
    }
}

/// Selection-count indicator. Exactly one of the two texts is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionSummary {
    NoneSelected,
    Selected(usize),
}

impl SelectionSummary {
    pub fn from_count(count: usize) -> Self {
        if count == 0 {
            SelectionSummary::NoneSelected
        } else {
            SelectionSummary::Selected(count)
        }
    }

    pub fn count(self) -> usize {
        match self {
            SelectionSummary::NoneSelected => 0,
            SelectionSummary::Selected(count) => count,
        }
    }
}

impl fmt::Display for SelectionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionSummary::NoneSelected => f.write_str("None selected"),
            SelectionSummary::Selected(count) => write!(f, "{} selected", count),
        }
    }
}

/// What the user activated, independent of how it was activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableEvent {
    SelectAll { checked: bool },
    RowToggle { index: usize, checked: bool },
    Download,
}

/// The table's record store and selection state machine.
///
/// The set of selected indices is the only source of truth; row highlight,
/// row checkbox, the select-all control and the summary are all derived from
/// it and refreshed at the end of every transition.
#[derive(Debug, Clone)]
pub struct TabularData {
    records: Vec<Record>,
    selected: BTreeSet<usize>,
    select_all: SelectionState,
    summary: SelectionSummary,
    available_status: String,
}

impl TabularData {
    pub fn new(records: Vec<Record>) -> Self {
        info!(rows = records.len(), "table constructed");
        let mut table = TabularData {
            records,
            selected: BTreeSet::new(),
            select_all: SelectionState::NotSelected,
            summary: SelectionSummary::NoneSelected,
            available_status: AVAILABLE_STATUS.to_string(),
        };
        table.recompute_summary();
        table
    }

    /// Fails as a whole on malformed input; no table is built.
    pub fn from_json(json: &str) -> Result<Self, TableError> {
        record::parse_records(json).map(TabularData::new)
    }

    pub fn with_available_status(mut self, status: impl Into<String>) -> Self {
        self.available_status = status.into();
        self
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected.contains(&index)
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    pub fn selected_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.selected.iter().copied()
    }

    pub fn select_all_state(&self) -> SelectionState {
        self.select_all
    }

    pub fn summary(&self) -> SelectionSummary {
        self.summary
    }

    /// Single entry point for every interaction. Only `Download` produces a
    /// result.
    pub fn dispatch(&mut self, event: TableEvent) -> Option<DownloadOutcome> {
        match event {
            TableEvent::SelectAll { checked } => {
                self.select_all(checked);
                None
            }
            TableEvent::RowToggle { index, checked } => {
                self.toggle_row(index, checked);
                None
            }
            TableEvent::Download => Some(self.download()),
        }
    }

    pub fn select_all(&mut self, checked: bool) {
        if checked {
            self.selected = (0..self.records.len()).collect();
        } else {
            self.selected.clear();
        }
        debug!(checked, "select all");
        self.recompute_summary();
    }

    /// Sets one row and leaves every other row untouched. Returns `false`
    /// for an index outside the table.
    pub fn toggle_row(&mut self, index: usize, checked: bool) -> bool {
        if index >= self.records.len() {
            debug!(index, rows = self.records.len(), "ignoring toggle for missing row");
            return false;
        }
        if checked {
            self.selected.insert(index);
        } else {
            self.selected.remove(&index);
        }
        debug!(index, checked, "row toggled");
        self.recompute_summary();
        true
    }

    pub fn download(&self) -> DownloadOutcome {
        let outcome =
            download::collect_downloadable(&self.records, &self.selected, &self.available_status);
        info!(
            selected = self.selected.len(),
            downloadable = outcome.items().len(),
            "download requested"
        );
        outcome
    }

    fn recompute_summary(&mut self) {
        let count = self.selected.len();
        self.select_all = SelectionState::from_counts(count, self.records.len());
        self.summary = SelectionSummary::from_count(count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn table_of(n: usize) -> TabularData {
        TabularData::new(
            (0..n)
                .map(|i| {
                    Record::new(
                        format!("file{i}"),
                        format!("dev{i}"),
                        format!("/f{i}"),
                        "available",
                    )
                })
                .collect(),
        )
    }

    fn assert_consistent(table: &TabularData) {
        let count = (0..table.len()).filter(|&i| table.is_selected(i)).count();
        let state = table.select_all_state();
        assert_eq!(table.selected_count(), count);
        assert_eq!(table.summary().count(), count);
        assert!(!(state.is_checked() && state.is_indeterminate()));
        assert_eq!(state.is_checked(), table.len() > 0 && count == table.len());
        assert_eq!(state.is_indeterminate(), count > 0 && count < table.len());
    }

    #[test]
    fn starts_with_nothing_selected() {
        let table = table_of(5);
        assert_eq!(table.selected_count(), 0);
        assert_eq!(table.select_all_state(), SelectionState::NotSelected);
        assert_eq!(table.summary().to_string(), "None selected");
        assert!((0..5).all(|i| !table.is_selected(i)));
    }

    #[test]
    fn select_all_then_deselect_one_goes_indeterminate() {
        let mut table = table_of(4);
        table.dispatch(TableEvent::SelectAll { checked: true });
        assert_eq!(table.selected_count(), 4);
        assert!(table.select_all_state().is_checked());
        assert!(!table.select_all_state().is_indeterminate());

        table.dispatch(TableEvent::RowToggle {
            index: 2,
            checked: false,
        });
        assert_eq!(table.selected_count(), 3);
        assert!(table.select_all_state().is_indeterminate());
        assert!(!table.select_all_state().is_checked());
        assert_eq!(table.summary().to_string(), "3 selected");
        assert_consistent(&table);
    }

    #[test]
    fn select_all_is_idempotent() {
        let mut once = table_of(3);
        once.select_all(true);
        let mut twice = table_of(3);
        twice.select_all(true);
        twice.select_all(true);
        assert_eq!(
            once.selected_indices().collect::<Vec<_>>(),
            twice.selected_indices().collect::<Vec<_>>()
        );
        assert_eq!(once.select_all_state(), twice.select_all_state());
        assert_eq!(once.summary(), twice.summary());

        twice.select_all(false);
        twice.select_all(false);
        assert_eq!(twice.selected_count(), 0);
        assert_eq!(twice.select_all_state(), SelectionState::NotSelected);
    }

    #[test]
    fn row_toggle_only_touches_its_row() {
        let mut table = table_of(4);
        table.toggle_row(0, true);
        table.toggle_row(3, true);
        let before: Vec<bool> = (0..4).map(|i| table.is_selected(i)).collect();

        assert!(table.toggle_row(1, true));
        let after: Vec<bool> = (0..4).map(|i| table.is_selected(i)).collect();
        for i in [0, 2, 3] {
            assert_eq!(before[i], after[i], "row {i} must not change");
        }
        assert!(after[1]);
        assert_consistent(&table);
    }

    #[test]
    fn toggling_every_row_reaches_fully_selected() {
        let mut table = table_of(3);
        for i in 0..3 {
            table.dispatch(TableEvent::RowToggle {
                index: i,
                checked: true,
            });
            assert_consistent(&table);
        }
        assert_eq!(table.select_all_state(), SelectionState::FullySelected);
    }

    #[test]
    fn out_of_range_toggle_is_ignored() {
        let mut table = table_of(2);
        assert!(!table.toggle_row(7, true));
        assert_eq!(table.selected_count(), 0);
        assert_eq!(table.summary(), SelectionSummary::NoneSelected);
    }

    #[test]
    fn empty_table_keeps_select_all_unchecked() {
        let mut table = table_of(0);
        assert_eq!(table.select_all_state(), SelectionState::NotSelected);
        table.dispatch(TableEvent::SelectAll { checked: true });
        assert!(!table.select_all_state().is_checked());
        assert!(!table.select_all_state().is_indeterminate());
        assert_eq!(table.summary().to_string(), "None selected");
        assert_eq!(
            table.dispatch(TableEvent::Download),
            Some(DownloadOutcome::NothingValid)
        );
    }

    #[test]
    fn only_download_produces_an_outcome() {
        let mut table = table_of(2);
        assert_eq!(table.dispatch(TableEvent::SelectAll { checked: true }), None);
        assert_eq!(
            table.dispatch(TableEvent::RowToggle {
                index: 0,
                checked: false
            }),
            None
        );
        let outcome = table
            .dispatch(TableEvent::Download)
            .expect("download always yields an outcome");
        assert_eq!(outcome.message(), "Downloading the following:\n/f1--dev1");
    }

    #[test]
    fn configured_status_decides_what_downloads() {
        let mut table = TabularData::new(vec![
            Record::new("a", "d1", "/a", "available"),
            Record::new("b", "d2", "/b", "ready"),
        ])
        .with_available_status("ready");
        table.select_all(true);
        let rendered: Vec<String> = table
            .download()
            .items()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(rendered, vec!["/b--d2"]);
    }

    #[test]
    fn selection_state_glyphs() {
        assert_eq!(SelectionState::from_counts(0, 3).glyph(), "[ ]");
        assert_eq!(SelectionState::from_counts(1, 3).glyph(), "[-]");
        assert_eq!(SelectionState::from_counts(3, 3).glyph(), "[x]");
        assert_eq!(SelectionState::from_counts(0, 0).glyph(), "[ ]");
    }
}
