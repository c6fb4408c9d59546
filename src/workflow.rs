use crate::config::{self, AppConfig};
use crate::download::{self, DownloadItem, DownloadOutcome};
use crate::error::TableError;
use crate::selection::{TableEvent, TabularData};
use crate::{cli, clipboard, logging, record, table_text, tui};
use anyhow::{Context, Result, bail};
use std::fs::File;
use std::io::{self, BufReader, IsTerminal, Write};
use std::path::Path;
use tracing::info;

// Reads the record list from the given file, or stdin when there is none.
fn load_records(input: Option<&Path>) -> Result<Vec<record::Record>> {
    match input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open record file {}", path.display()))?;
            record::read_records(BufReader::new(file))
                .with_context(|| format!("failed to load records from {}", path.display()))
        }
        None => {
            let stdin = io::stdin();
            if stdin.is_terminal() {
                bail!("no record file given and stdin is a terminal; pass FILE or pipe JSON in");
            }
            record::read_records(stdin.lock()).context("failed to load records from stdin")
        }
    }
}

/// Applies --select-all and --select through the same dispatcher the TUI uses.
pub fn apply_preselection(
    table: &mut TabularData,
    select: &[usize],
    select_all: bool,
) -> Result<(), TableError> {
    if let Some(&index) = select.iter().find(|&&index| index >= table.len()) {
        return Err(TableError::RowOutOfRange {
            index,
            total: table.len(),
        });
    }
    if select_all {
        table.dispatch(TableEvent::SelectAll { checked: true });
    }
    for &index in select {
        table.dispatch(TableEvent::RowToggle {
            index,
            checked: true,
        });
    }
    Ok(())
}

// Hands the confirmed list to the clipboard or stdout.
fn hand_off(items: &[DownloadItem], copy_to_clipboard: bool) -> Result<()> {
    info!(items = items.len(), copy_to_clipboard, "handing off download list");
    if copy_to_clipboard {
        clipboard::copy_download_list(items)?;
        eprintln!("✅ Copied {} item(s) to the clipboard.", items.len());
    } else {
        download::write_download_list(io::stdout().lock(), items)?;
    }
    Ok(())
}

/// Headless mode: writes the table, a blank line and the download message to
/// `out`. With `copy_to_clipboard` a non-empty list goes to the clipboard
/// instead of the message.
pub fn run_headless_mode<W: Write>(
    table: &TabularData,
    copy_to_clipboard: bool,
    mut out: W,
) -> Result<()> {
    write!(out, "{}", table_text::render_table_text(table))?;
    writeln!(out)?;

    let outcome = table.download();
    match &outcome {
        DownloadOutcome::Items(items) if copy_to_clipboard => hand_off(items, true)?,
        _ => writeln!(out, "{}", outcome.message())?,
    }
    out.flush()?;
    Ok(())
}

// Handles interactive mode: runs the TUI and hands off whatever the user confirmed.
fn run_interactive_mode(table: TabularData, copy_to_clipboard: bool) -> Result<()> {
    match tui::run_tui(table)? {
        Some(items) => hand_off(&items, copy_to_clipboard),
        None => {
            eprintln!("No download confirmed.");
            Ok(())
        }
    }
}

pub fn run_tabular_data(cli_args: cli::Cli) -> Result<()> {
    let config: AppConfig = config::load_config(cli_args.config.as_deref())?;
    let log_file = cli_args.log_file.clone().or_else(|| config.log_file.clone());
    logging::init_logging(log_file.as_deref(), &config.log_level, !cli_args.headless)?;

    let records = load_records(cli_args.input_path().map(|p| p.as_path()))?;
    let mut table = TabularData::new(records).with_available_status(&config.available_status);
    apply_preselection(&mut table, &cli_args.select, cli_args.select_all)?;

    let copy_to_clipboard = cli_args.copy || config.copy_to_clipboard;
    if cli_args.headless {
        run_headless_mode(&table, copy_to_clipboard, io::stdout().lock())
    } else {
        run_interactive_mode(table, copy_to_clipboard)
    }
}
