use crate::selection::TabularData;
use crate::utils::{capitalize_first, checkbox_glyph};

pub const HEADERS: [&str; 4] = ["Name", "Device", "Path", "Status"];
const COLUMN_GAP: &str = "  ";

/// Display cells of one data row, in column order.
pub fn row_cells(table: &TabularData, index: usize) -> Option<[String; 4]> {
    table.records().get(index).map(|record| {
        [
            record.name.clone(),
            record.device.clone(),
            record.path.clone(),
            capitalize_first(&record.status),
        ]
    })
}

/// Plain-text projection of the whole widget: the actions line, the header
/// and one line per record, columns padded to the widest cell.
pub fn render_table_text(table: &TabularData) -> String {
    let rows: Vec<[String; 4]> = (0..table.len())
        .filter_map(|idx| row_cells(table, idx))
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for cells in &rows {
        for (width, cell) in widths.iter_mut().zip(cells.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = format!(
        "{} Select all | {} | Download selected\n",
        table.select_all_state().glyph(),
        table.summary()
    );

    let header_cells = HEADERS.map(str::to_string);
    out.push_str(&format_line("   ", &header_cells, &widths));
    for (idx, cells) in rows.iter().enumerate() {
        out.push_str(&format_line(
            checkbox_glyph(table.is_selected(idx)),
            cells,
            &widths,
        ));
    }
    out
}

fn format_line(prefix: &str, cells: &[String; 4], widths: &[usize; 4]) -> String {
    let mut line = String::from(prefix);
    for (cell, width) in cells.iter().zip(widths.iter()) {
        line.push_str(COLUMN_GAP);
        line.push_str(cell);
        line.push_str(&" ".repeat(width.saturating_sub(cell.chars().count())));
    }
    let mut line = line.trim_end().to_string();
    line.push('\n');
    line
}
