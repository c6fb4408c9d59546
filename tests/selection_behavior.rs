use std::fs;

use anyhow::Result;
use pretty_assertions::assert_eq;
use tabular_data::download::NOTHING_VALID_MESSAGE;
use tabular_data::record::read_records;
use tabular_data::table_text::render_table_text;
use tabular_data::workflow::apply_preselection;
use tabular_data::{
    DownloadOutcome, Record, SelectionState, SelectionSummary, TableError, TableEvent, TabularData,
};

fn records(n: usize) -> Vec<Record> {
    (0..n)
        .map(|i| {
            Record::new(
                format!("file{i}"),
                format!("dev{i}"),
                format!("/f{i}"),
                "available",
            )
        })
        .collect()
}

fn assert_invariants(table: &TabularData) {
    let count = (0..table.len()).filter(|&i| table.is_selected(i)).count();
    let state = table.select_all_state();

    assert!(!(state.is_checked() && state.is_indeterminate()));
    assert_eq!(state.is_checked(), table.len() > 0 && count == table.len());
    assert_eq!(state.is_indeterminate(), count > 0 && count < table.len());

    match table.summary() {
        SelectionSummary::NoneSelected => assert_eq!(count, 0),
        SelectionSummary::Selected(n) => {
            assert_eq!(n, count);
            assert_eq!(table.summary().to_string(), format!("{count} selected"));
        }
    }
}

#[test]
fn invariants_hold_across_an_interaction_sequence() {
    let mut table = TabularData::new(records(5));
    let events = [
        TableEvent::RowToggle {
            index: 1,
            checked: true,
        },
        TableEvent::RowToggle {
            index: 4,
            checked: true,
        },
        TableEvent::SelectAll { checked: true },
        TableEvent::RowToggle {
            index: 0,
            checked: false,
        },
        TableEvent::RowToggle {
            index: 0,
            checked: false,
        },
        TableEvent::SelectAll { checked: false },
        TableEvent::RowToggle {
            index: 9,
            checked: true,
        },
        TableEvent::Download,
        TableEvent::RowToggle {
            index: 3,
            checked: true,
        },
    ];
    assert_invariants(&table);
    for event in events {
        table.dispatch(event);
        assert_invariants(&table);
    }
    assert_eq!(table.selected_indices().collect::<Vec<_>>(), vec![3]);
}

#[test]
fn empty_selection_download_reports_nothing_valid() {
    let mut table = TabularData::new(records(3));
    let outcome = table.dispatch(TableEvent::Download);
    assert_eq!(outcome, Some(DownloadOutcome::NothingValid));
    assert_eq!(
        outcome.map(|o| o.message()),
        Some(NOTHING_VALID_MESSAGE.to_string())
    );
}

#[test]
fn mixed_availability_downloads_only_available_rows() -> Result<()> {
    let mut table = TabularData::from_json(
        r#"[
            {"name": "a", "path": "/a", "device": "d1", "status": "available"},
            {"name": "b", "path": "/b", "device": "d2", "status": "pending"}
        ]"#,
    )?;
    table.dispatch(TableEvent::RowToggle {
        index: 0,
        checked: true,
    });
    table.dispatch(TableEvent::RowToggle {
        index: 1,
        checked: true,
    });

    let outcome = table.dispatch(TableEvent::Download).expect("download outcome");
    let rendered: Vec<String> = outcome.items().iter().map(ToString::to_string).collect();
    assert_eq!(rendered, vec!["/a--d1"]);
    assert_eq!(table.selected_count(), 2, "selection and download set may diverge");
    Ok(())
}

#[test]
fn select_all_then_deselect_one() {
    let mut table = TabularData::new(records(4));
    table.dispatch(TableEvent::SelectAll { checked: true });
    assert_eq!(table.selected_count(), 4);
    assert_eq!(table.select_all_state(), SelectionState::FullySelected);

    table.dispatch(TableEvent::RowToggle {
        index: 2,
        checked: false,
    });
    assert_eq!(table.selected_count(), 3);
    assert_eq!(table.select_all_state(), SelectionState::PartiallySelected);
    assert_eq!(table.summary().to_string(), "3 selected");
}

#[test]
fn zero_rows_keep_select_all_unchecked() {
    let mut table = TabularData::new(Vec::new());
    for checked in [true, false, true] {
        table.dispatch(TableEvent::SelectAll { checked });
        let state = table.select_all_state();
        assert!(!state.is_checked());
        assert!(!state.is_indeterminate());
        assert_eq!(table.summary(), SelectionSummary::NoneSelected);
    }
    assert_eq!(
        table.dispatch(TableEvent::Download),
        Some(DownloadOutcome::NothingValid)
    );
}

#[test]
fn rendering_n_records_yields_n_unchecked_rows() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("records.json");
    fs::write(&path, serde_json_list(7))?;

    let table = TabularData::new(read_records(fs::File::open(&path)?)?);
    let text = render_table_text(&table);
    let row_lines: Vec<&str> = text.lines().skip(2).collect();

    assert_eq!(row_lines.len(), 7);
    assert!(row_lines.iter().all(|line| line.starts_with("[ ]")));
    assert!(text.starts_with("[ ] Select all | None selected"));
    Ok(())
}

#[test]
fn malformed_input_builds_no_table() {
    let inputs = [
        "not json",
        "{}",
        r#"[{"name": "a"}]"#,
        r#"[{"name": "a", "device": "d", "path": 3, "status": "available"}]"#,
    ];
    for json in inputs {
        assert!(matches!(
            TabularData::from_json(json),
            Err(TableError::MalformedInput(_))
        ));
    }
}

#[test]
fn preselection_goes_through_the_dispatcher() -> Result<()> {
    let mut table = TabularData::new(records(3));
    apply_preselection(&mut table, &[2], false)?;
    assert_eq!(table.select_all_state(), SelectionState::PartiallySelected);

    let err = apply_preselection(&mut table, &[5], false).unwrap_err();
    assert_eq!(err.to_string(), "row 5 is out of range for a table of 3 rows");
    Ok(())
}

fn serde_json_list(n: usize) -> String {
    let items: Vec<String> = (0..n)
        .map(|i| {
            format!(
                r#"{{"name": "f{i}", "device": "d{i}", "path": "/f{i}", "status": "scheduled"}}"#
            )
        })
        .collect();
    format!("[{}]", items.join(","))
}
