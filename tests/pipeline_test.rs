//! Integration tests for the load → chart pipeline.
//!
//! Nothing here opens a window: the chart is built and inspected, which is
//! every step of rendering short of display.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use tempfile::tempdir;

use cno_viewer::chart::Chart;
use cno_viewer::data::{load, load_file, write_table, Table};
use cno_viewer::species::CNO_SPECIES;
use cno_viewer::{render, Error};

const HEADER: &str = "tnow he4 c12 n13 c13 n14 o15 n15 o16 f17 o17 f18 o18 h1";
const ROW: &str = "1.0 0.9 0.05 1e-8 1e-9 1e-10 1e-11 1e-12 0.01 1e-13 1e-14 1e-15 1e-16 0.04";

fn write(dir: &Path, name: &str, text: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, text).unwrap();
    path
}

/// Scenario 1: one data row, all fourteen columns.
#[test]
fn test_single_row_renders_thirteen_series() {
    let dir = tempdir().unwrap();
    let path = write(dir.path(), "results.dat", &format!("{HEADER}\n{ROW}\n"));

    let table = load(&path, ' ').unwrap();
    assert_eq!(table.n_rows(), 1);
    assert_eq!(table.n_columns(), 14);

    let chart = Chart::build(&table, &CNO_SPECIES).unwrap();
    assert_eq!(chart.series.len(), 13);
    assert!((chart.x_decades.0 - 2.0).abs() < 1e-12);
    assert!((chart.x_decades.1 - 22.0).abs() < 1e-12);
    assert!((chart.y_decades.0 + 10.0).abs() < 1e-12);
    assert!((chart.y_decades.1 - 1.0).abs() < 1e-12);
    assert_eq!(chart.title, "hydrostatic burn; T = 15 MK; rho = 150 g/cm^3");
}

/// Scenario 2: a missing file fails before any chart is built.
#[test]
fn test_missing_file_is_file_not_found() {
    let dir = tempdir().unwrap();
    let err = load(&dir.path().join("nope.dat"), ' ').unwrap_err();
    assert!(matches!(err, Error::FileNotFound { .. }), "{err}");
    assert!(err.to_string().contains("nope.dat"));
}

/// Scenario 3: unrelated extra columns are ignored by the renderer.
#[test]
fn test_extra_column_is_ignored() {
    let dir = tempdir().unwrap();
    let text = format!("{HEADER} pressure\n{ROW} 1.0e17\n");
    let path = write(dir.path(), "results.dat", &text);

    let table = load(&path, ' ').unwrap();
    assert_eq!(table.n_columns(), 15);
    let chart = Chart::build(&table, &CNO_SPECIES).unwrap();
    assert_eq!(chart.series.len(), 13);
    assert!(chart.series.iter().all(|s| s.label != "pressure"));
}

#[test]
fn test_row_and_column_counts_round_trip() {
    let dir = tempdir().unwrap();
    for n in [0usize, 1, 7, 250] {
        let mut text = format!("{HEADER}\n");
        for i in 0..n {
            text.push_str(&format!("{}.0 {ROW_TAIL}\n", i + 1));
        }
        let path = write(dir.path(), &format!("rows_{n}.dat"), &text);
        let table = load(&path, ' ').unwrap();
        assert_eq!(table.n_rows(), n);
        assert_eq!(table.n_columns(), 14);
        for name in table.column_names() {
            assert_eq!(table.column(name).unwrap().len(), n);
        }
    }
}

const ROW_TAIL: &str = "0.9 0.05 1e-8 1e-9 1e-10 1e-11 1e-12 0.01 1e-13 1e-14 1e-15 1e-16 0.04";

#[test]
fn test_header_only_gives_empty_chart() {
    let dir = tempdir().unwrap();
    let path = write(dir.path(), "empty.dat", &format!("{HEADER}\n"));
    let table = load(&path, ' ').unwrap();
    assert_eq!(table.n_rows(), 0);

    let chart = Chart::build(&table, &CNO_SPECIES).unwrap();
    assert_eq!(chart.series.len(), 13);
    assert!(chart.series.iter().all(|s| s.n_points() == 0));
}

#[test]
fn test_missing_species_column_fails() {
    let dir = tempdir().unwrap();
    let header = HEADER.replace(" f18", "");
    let row = "1.0 0.9 0.05 1e-8 1e-9 1e-10 1e-11 1e-12 0.01 1e-13 1e-14 1e-16 0.04";
    let path = write(dir.path(), "no_f18.dat", &format!("{header}\n{row}\n"));

    let table = load(&path, ' ').unwrap();
    match Chart::build(&table, &CNO_SPECIES) {
        Err(Error::MissingColumn { column }) => assert_eq!(column, "f18"),
        other => panic!("expected MissingColumn, got {other:?}"),
    }
}

/// The column check runs before any window is created, so this returns
/// without a display.
#[test]
fn test_render_missing_species_fails_before_display() {
    let dir = tempdir().unwrap();
    let header = HEADER.replace(" o17", "");
    let row = "1.0 0.9 0.05 1e-8 1e-9 1e-10 1e-11 1e-12 0.01 1e-13 1e-15 1e-16 0.04";
    let path = write(dir.path(), "no_o17.dat", &format!("{header}\n{row}\n"));

    let table = load(&path, ' ').unwrap();
    match render(&table, &CNO_SPECIES, Some(path.as_path()), ' ') {
        Err(Error::MissingColumn { column }) => assert_eq!(column, "o17"),
        other => panic!("expected MissingColumn, got {other:?}"),
    }
}

#[test]
fn test_ragged_row_gives_no_table() {
    let dir = tempdir().unwrap();
    let text = format!("{HEADER}\n{ROW}\n1.0 2.0 3.0\n{ROW}\n");
    let path = write(dir.path(), "ragged.dat", &text);
    match load(&path, ' ') {
        Err(Error::MalformedRow { line, reason, .. }) => {
            assert_eq!(line, 3);
            assert!(reason.contains("expected 14"), "{reason}");
        }
        other => panic!("expected MalformedRow, got {other:?}"),
    }
}

#[test]
fn test_writer_output_loads_back() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("written.dat");
    let table = Table::from_columns([
        ("tnow", vec![1.0e-8, 3.5e4, 1.0e22]),
        ("h1", vec![0.99, 0.5, 0.0]),
    ])
    .unwrap();
    write_table(&path, &table).unwrap();

    let loaded = load(&path, ' ').unwrap();
    assert_eq!(loaded.column_names(), table.column_names());
    assert_eq!(loaded.column("tnow"), Some(&[1.0e-8, 3.5e4, 1.0e22][..]));
    assert_eq!(loaded.column("h1"), Some(&[0.99, 0.5, 0.0][..]));
}

#[test]
fn test_csv_dispatch() {
    let dir = tempdir().unwrap();
    let text = format!("{}\n{}\n", HEADER.replace(' ', ","), ROW.replace(' ', ","));
    let path = write(dir.path(), "results.csv", &text);

    let table = load_file(&path, ' ').unwrap();
    assert_eq!(table.n_rows(), 1);
    assert_eq!(table.column("o16"), Some(&[0.01][..]));
    Chart::build(&table, &CNO_SPECIES).unwrap();
}

#[test]
fn test_csv_ragged_row_is_malformed() {
    let dir = tempdir().unwrap();
    let path = write(dir.path(), "bad.csv", "tnow,h1\n1,2\n3\n");
    let err = load_file(&path, ' ').unwrap_err();
    assert!(matches!(err, Error::MalformedRow { line: 3, .. }), "{err}");
}

#[test]
fn test_json_records() {
    let dir = tempdir().unwrap();
    let path = write(
        dir.path(),
        "results.json",
        r#"[{"tnow": 1.0, "h1": 0.99}, {"tnow": 2.0, "h1": 0.98}]"#,
    );
    let table = load_file(&path, ' ').unwrap();
    assert_eq!(table.column_names(), ["tnow", "h1"]);
    assert_eq!(table.column("h1"), Some(&[0.99, 0.98][..]));

    let bad = write(dir.path(), "bad.json", r#"[{"tnow": 1.0}, {"tnow": "x"}]"#);
    let err = load_file(&bad, ' ').unwrap_err();
    assert!(matches!(err, Error::MalformedRow { line: 2, .. }), "{err}");
}

#[test]
fn test_parquet_numeric_columns() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("results.parquet");

    let schema = Arc::new(Schema::new(vec![
        Field::new("tnow", DataType::Float64, false),
        Field::new("h1", DataType::Float64, false),
        Field::new("step", DataType::Int64, false),
        Field::new("note", DataType::Utf8, false),
    ]));
    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Float64Array::from(vec![1.0, 10.0])),
            Arc::new(Float64Array::from(vec![0.99, 0.98])),
            Arc::new(Int64Array::from(vec![1, 2])),
            Arc::new(StringArray::from(vec!["a", "b"])),
        ],
    )
    .unwrap();
    let file = fs::File::create(&path).unwrap();
    let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();

    let table = load_file(&path, ' ').unwrap();
    assert_eq!(table.column_names(), ["tnow", "h1", "step"]);
    assert_eq!(table.column("step"), Some(&[1.0, 2.0][..]));
    assert_eq!(table.n_rows(), 2);
}

#[test]
fn test_non_monotonic_time_is_plotted_as_is() {
    let dir = tempdir().unwrap();
    let text = format!("{HEADER}\n1.0e5 {ROW_TAIL}\n1.0e3 {ROW_TAIL}\n");
    let path = write(dir.path(), "backwards.dat", &text);
    let table = load(&path, ' ').unwrap();
    assert_eq!(table.column("tnow"), Some(&[1.0e5, 1.0e3][..]));

    let chart = Chart::build(&table, &CNO_SPECIES).unwrap();
    let he4 = &chart.series[0].segments[0];
    assert!(he4[0][0] > he4[1][0]);
}
