use super::app_logic::TuiApp;
use super::app_state::AppMode;
use crate::table_text::{HEADERS, row_cells};
use crate::utils::checkbox_glyph;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap},
};

const SELECT_ALL_LABEL: &str = "Select all";
const DOWNLOAD_LABEL: &str = "[ Download selected ]";

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

fn draw_help_block(f: &mut Frame, area: Rect) {
    let help_text_lines_content = vec![
        Line::from("Arrows/jk: Nav | PgUp/PgDn/Home/End: Jump | Space/Enter: Toggle row"),
        Line::from("a: Select all | d: Download selected | y: Confirm download | q/Esc: Quit"),
    ];
    let help_paragraph = Paragraph::new(help_text_lines_content).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Tabular Data"),
    );
    f.render_widget(help_paragraph, area);
}

fn draw_actions_block(f: &mut Frame, app: &mut TuiApp, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Actions");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let select_all_text = format!(
        "{} {}",
        app.table.select_all_state().glyph(),
        SELECT_ALL_LABEL
    );
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(select_all_text.chars().count() as u16),
            Constraint::Length(2),
            Constraint::Min(14),
            Constraint::Length(DOWNLOAD_LABEL.chars().count() as u16),
        ])
        .split(inner);

    app.regions.select_all = chunks[0];
    app.regions.download = chunks[3];

    f.render_widget(Paragraph::new(select_all_text), chunks[0]);
    f.render_widget(
        Paragraph::new(app.table.summary().to_string())
            .style(Style::default().add_modifier(Modifier::ITALIC)),
        chunks[2],
    );
    f.render_widget(
        Paragraph::new(DOWNLOAD_LABEL).style(Style::default().add_modifier(Modifier::BOLD)),
        chunks[3],
    );
}

fn draw_table_block(f: &mut Frame, app: &mut TuiApp, area: Rect) {
    // Borders take two lines and the header one more.
    app.list_viewport_height = area.height.saturating_sub(3) as usize;
    app.ensure_cursor_is_visible_in_viewport();
    app.regions.table_body = Rect {
        x: area.x + 1,
        y: area.y + 2,
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(3),
    };

    let end = (app.scroll_offset + app.list_viewport_height).min(app.table.len());
    let rows: Vec<Row> = (app.scroll_offset..end)
        .filter_map(|idx| {
            let cells = row_cells(&app.table, idx)?;
            let selected = app.table.is_selected(idx);
            let row = Row::new(
                std::iter::once(Cell::from(checkbox_glyph(selected)))
                    .chain(cells.into_iter().map(Cell::from)),
            );
            Some(if selected {
                row.style(Style::default().bg(Color::DarkGray))
            } else {
                row
            })
        })
        .collect();

    let header = Row::new(std::iter::once("").chain(HEADERS))
        .style(Style::default().add_modifier(Modifier::BOLD));
    let widths = [
        Constraint::Length(3),
        Constraint::Percentage(25),
        Constraint::Percentage(20),
        Constraint::Percentage(35),
        Constraint::Min(10),
    ];
    let title = format!("Files ({})", app.table.len());
    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title))
        .column_spacing(1)
        .row_highlight_style(Style::default().add_modifier(Modifier::BOLD))
        .highlight_symbol("❯ ");

    let mut state = TableState::default();
    if !app.table.is_empty() {
        state.select(Some(app.cursor_idx - app.scroll_offset));
    }
    f.render_stateful_widget(table, area, &mut state);
}

fn draw_popup(f: &mut Frame, app: &TuiApp) {
    let Some(outcome) = &app.popup else {
        return;
    };
    let title = if outcome.is_nothing_valid() {
        "Nothing to download"
    } else {
        "Download"
    };
    let message = outcome.message();
    let mut lines: Vec<Line> = message.lines().map(Line::from).collect();
    lines.push(Line::from(""));
    let footer = if outcome.is_nothing_valid() {
        "Enter/Esc: Close"
    } else {
        "y: Confirm | Enter/Esc: Close"
    };
    lines.push(Line::from(footer).style(Style::default().fg(Color::DarkGray)));

    let area = centered_rect(60, 40, f.area());
    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title(title)),
        area,
    );
}

pub(super) fn ui_frame(frame: &mut Frame, app: &mut TuiApp) {
    let help_lines = 2;
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(help_lines + 2),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(frame.area());

    draw_help_block(frame, main_chunks[0]);
    draw_actions_block(frame, app, main_chunks[1]);
    draw_table_block(frame, app, main_chunks[2]);

    if app.mode == AppMode::Popup {
        draw_popup(frame, app);
    }
}
