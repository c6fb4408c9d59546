use ratatui::layout::{Position, Rect};

/// The on-screen control an input landed on. First match wins in declaration
/// order; `Other` is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    SelectAll,
    RowCheckbox(usize),
    Download,
    Other,
}

#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub(super) enum AppMode {
    Normal,
    /// A download result is on screen; everything but dismissal is ignored.
    Popup,
}

/// Screen areas of the clickable controls, refreshed on every draw.
#[derive(Debug, Default, Clone, Copy)]
pub(super) struct HitRegions {
    pub(super) select_all: Rect,
    pub(super) download: Rect,
    /// Data rows only, header and borders excluded.
    pub(super) table_body: Rect,
}

impl HitRegions {
    pub(super) fn control_at(
        &self,
        column: u16,
        row: u16,
        scroll_offset: usize,
        row_count: usize,
    ) -> Control {
        let pos = Position::new(column, row);
        if self.select_all.contains(pos) {
            return Control::SelectAll;
        }
        if self.table_body.contains(pos) {
            let idx = scroll_offset + (row - self.table_body.y) as usize;
            if idx < row_count {
                return Control::RowCheckbox(idx);
            }
            return Control::Other;
        }
        if self.download.contains(pos) {
            return Control::Download;
        }
        Control::Other
    }
}
