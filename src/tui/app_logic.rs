use super::app_state::{AppMode, Control, HitRegions};
use crate::download::{DownloadItem, DownloadOutcome};
use crate::selection::{TableEvent, TabularData};
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use tracing::trace;

pub struct TuiApp {
    pub(super) table: TabularData,
    pub(super) cursor_idx: usize,
    pub(super) scroll_offset: usize,
    pub(super) quit: bool,
    pub(super) mode: AppMode,
    pub(super) popup: Option<DownloadOutcome>,
    /// Set when the user confirms a non-empty download.
    pub(super) confirmed_items: Option<Vec<DownloadItem>>,
    pub(super) list_viewport_height: usize,
    pub(super) regions: HitRegions,
}

impl TuiApp {
    pub fn new(table: TabularData) -> Self {
        TuiApp {
            table,
            cursor_idx: 0,
            scroll_offset: 0,
            quit: false,
            mode: AppMode::Normal,
            popup: None,
            confirmed_items: None,
            list_viewport_height: 0, // Will be updated by ui_renderer
            regions: HitRegions::default(),
        }
    }

    /// Maps an activated control to the event it stands for. A checkbox's new
    /// value is the opposite of what it shows now; an indeterminate select-all
    /// counts as unchecked.
    pub(super) fn event_for(&self, control: Control) -> Option<TableEvent> {
        match control {
            Control::SelectAll => Some(TableEvent::SelectAll {
                checked: !self.table.select_all_state().is_checked(),
            }),
            Control::RowCheckbox(index) if index < self.table.len() => {
                Some(TableEvent::RowToggle {
                    index,
                    checked: !self.table.is_selected(index),
                })
            }
            Control::Download => Some(TableEvent::Download),
            Control::RowCheckbox(_) | Control::Other => None,
        }
    }

    pub(super) fn activate(&mut self, control: Control) {
        let Some(event) = self.event_for(control) else {
            trace!(?control, "ignoring input on inactive control");
            return;
        };
        if let Some(outcome) = self.table.dispatch(event) {
            self.show_popup(outcome);
        }
    }

    fn show_popup(&mut self, outcome: DownloadOutcome) {
        self.popup = Some(outcome);
        self.mode = AppMode::Popup;
    }

    fn dismiss_popup(&mut self) {
        self.popup = None;
        self.mode = AppMode::Normal;
    }

    /// Quits with the downloadable items, or shows why there are none.
    pub(super) fn confirm_download(&mut self) {
        match self.table.download() {
            DownloadOutcome::Items(items) => {
                self.confirmed_items = Some(items);
                self.quit = true;
            }
            outcome @ DownloadOutcome::NothingValid => self.show_popup(outcome),
        }
    }

    pub(super) fn move_cursor(&mut self, delta: i64) {
        let len = self.table.len();
        if len == 0 {
            return;
        }
        let target = (self.cursor_idx as i64 + delta).clamp(0, len as i64 - 1);
        self.cursor_idx = target as usize;
        self.ensure_cursor_is_visible_in_viewport();
    }

    fn page_size(&self) -> i64 {
        self.list_viewport_height.max(1) as i64
    }

    pub(super) fn ensure_cursor_is_visible_in_viewport(&mut self) {
        let len = self.table.len();
        if len == 0 || self.list_viewport_height == 0 {
            self.scroll_offset = 0;
            return;
        }
        let height = self.list_viewport_height;
        self.cursor_idx = self.cursor_idx.min(len - 1);
        if self.cursor_idx < self.scroll_offset {
            self.scroll_offset = self.cursor_idx;
        } else if self.cursor_idx >= self.scroll_offset + height {
            self.scroll_offset = self.cursor_idx + 1 - height;
        }
        self.scroll_offset = self.scroll_offset.min(len.saturating_sub(height));
    }

    // --- Event handling sub-methods ---
    pub(super) fn handle_key(&mut self, key_event: KeyEvent) {
        match self.mode {
            AppMode::Popup => self.handle_popup_key(key_event),
            AppMode::Normal => self.handle_normal_mode_input(key_event),
        }
    }

    fn handle_popup_key(&mut self, key_event: KeyEvent) {
        match key_event.code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') | KeyCode::Char('q') => {
                self.dismiss_popup()
            }
            KeyCode::Char('y') => {
                self.dismiss_popup();
                self.confirm_download();
            }
            _ => {}
        }
    }

    pub(super) fn handle_normal_mode_input(&mut self, key_event: KeyEvent) {
        match key_event.code {
            KeyCode::Char('q') | KeyCode::Esc => self.quit = true,
            KeyCode::Char('y') => self.confirm_download(),
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-1),
            KeyCode::PageDown => self.move_cursor(self.page_size()),
            KeyCode::PageUp => self.move_cursor(-self.page_size()),
            KeyCode::Home => self.move_cursor(-(self.table.len() as i64)),
            KeyCode::End => self.move_cursor(self.table.len() as i64),
            KeyCode::Char(' ') | KeyCode::Enter => {
                self.activate(Control::RowCheckbox(self.cursor_idx))
            }
            KeyCode::Char('a') => self.activate(Control::SelectAll),
            KeyCode::Char('d') => self.activate(Control::Download),
            _ => {}
        }
    }

    pub(super) fn handle_mouse(&mut self, mouse_event: MouseEvent) {
        if mouse_event.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        if self.mode == AppMode::Popup {
            self.dismiss_popup();
            return;
        }
        let control = self.regions.control_at(
            mouse_event.column,
            mouse_event.row,
            self.scroll_offset,
            self.table.len(),
        );
        if let Control::RowCheckbox(idx) = control {
            self.cursor_idx = idx;
        }
        self.activate(control);
    }
}
