use std::fs::File;
use std::path::Path;

use arrow::array::{Array, AsArray};
use arrow::datatypes::{DataType, Float64Type, Schema};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::errors::ParquetError;
use serde_json::Value as JsonValue;

use super::model::Table;
use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a table from a file, dispatching by extension.
///
/// Supported formats:
/// * `.csv`              – comma-separated, header row first
/// * `.json`             – `[{ "tnow": 1.0, "h1": 0.99, ... }, ...]`
/// * `.parquet` / `.pq`  – every numeric column becomes a table column
/// * anything else       – delimiter-separated text, see [`load`]
pub fn load_file(path: &Path, delimiter: char) -> Result<Table> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "csv" => load_csv(path)?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        _ => load(path, delimiter)?,
    };
    log::info!(
        "Loaded {} rows x {} columns from {}",
        table.n_rows(),
        table.n_columns(),
        path.display()
    );
    Ok(table)
}

/// Load a delimiter-separated text table.
///
/// The first non-empty line is the header. Repeated delimiters collapse, so
/// the fixed-width `%15.4e` output of the burn network parses with `' '`.
/// Blank lines are skipped. Line numbers in errors are 1-based.
pub fn load(path: &Path, delimiter: char) -> Result<Table> {
    let text = read_text(path)?;
    parse_delimited(&text, delimiter, path)
}

/// Read a whole file as UTF-8. Bytes that are not UTF-8 are a malformed
/// row on the line holding them, not an unreadable file.
fn read_text(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|source| Error::FileNotFound {
        path: path.to_path_buf(),
        source,
    })?;
    String::from_utf8(bytes).map_err(|e| {
        let valid = e.utf8_error().valid_up_to();
        let bytes = e.as_bytes();
        let line = bytes[..valid].iter().filter(|&&b| b == b'\n').count() + 1;
        Error::malformed(path, line, format!("invalid UTF-8 at byte {valid}"))
    })
}

/// Split one line into non-empty fields. A whitespace delimiter splits on
/// any run of whitespace, so tabs and spaces mix freely.
fn split_fields(line: &str, delimiter: char) -> Vec<&str> {
    if delimiter.is_whitespace() {
        line.split_whitespace().collect()
    } else {
        line.split(delimiter)
            .map(str::trim)
            .filter(|field| !field.is_empty())
            .collect()
    }
}

fn parse_delimited(text: &str, delimiter: char, path: &Path) -> Result<Table> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line))
        .filter(|(_, line)| !line.trim().is_empty());

    // A file without any header is an empty table, not an error.
    let Some((header_line, header)) = lines.next() else {
        return Ok(Table::default());
    };
    let names = split_fields(header, delimiter);
    check_unique(&names, path, header_line)?;

    let mut table = Table::with_columns(names.iter().copied());
    let mut row = Vec::with_capacity(names.len());

    for (line_no, line) in lines {
        row.clear();
        for (col, field) in split_fields(line, delimiter).into_iter().enumerate() {
            let value = parse_value(field).ok_or_else(|| {
                let column = names.get(col).copied().unwrap_or("<extra>");
                Error::malformed(path, line_no, format!("'{field}' in column '{column}' is not a number"))
            })?;
            row.push(value);
        }
        if row.len() != names.len() {
            return Err(Error::malformed(
                path,
                line_no,
                format!("expected {} fields, found {}", names.len(), row.len()),
            ));
        }
        table.push_row(&row);
    }

    Ok(table)
}

fn check_unique(names: &[&str], path: &Path, line: usize) -> Result<()> {
    for (i, name) in names.iter().enumerate() {
        if names[..i].contains(name) {
            return Err(Error::malformed(path, line, format!("duplicate column name '{name}'")));
        }
    }
    Ok(())
}

/// Parse one numeric field. Fortran-style `D` exponents are accepted too.
fn parse_value(field: &str) -> Option<f64> {
    field
        .parse::<f64>()
        .ok()
        .or_else(|| field.replace(['D', 'd'], "e").parse::<f64>().ok())
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one numeric value per cell.
fn load_csv(path: &Path) -> Result<Table> {
    let file = File::open(path).map_err(|source| Error::FileNotFound {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(file);

    let names: Vec<String> = reader
        .headers()
        .map_err(|e| csv_error(path, e))?
        .iter()
        .map(str::to_string)
        .collect();
    let name_refs: Vec<&str> = names.iter().map(String::as_str).collect();
    check_unique(&name_refs, path, 1)?;

    let mut table = Table::with_columns(names.iter().cloned());
    let mut row = Vec::with_capacity(names.len());

    for result in reader.records() {
        let record = result.map_err(|e| csv_error(path, e))?;
        let line = record.position().map_or(0, |p| p.line() as usize);
        row.clear();
        for (col, field) in record.iter().enumerate() {
            let value = parse_value(field).ok_or_else(|| {
                Error::malformed(path, line, format!("'{field}' in column '{}' is not a number", names[col]))
            })?;
            row.push(value);
        }
        table.push_row(&row);
    }

    Ok(table)
}

fn csv_error(path: &Path, err: csv::Error) -> Error {
    let line = err.position().map_or(0, |p| p.line() as usize);
    match err.into_kind() {
        csv::ErrorKind::Io(source) => Error::FileNotFound {
            path: path.to_path_buf(),
            source,
        },
        csv::ErrorKind::UnequalLengths { expected_len, len, .. } => Error::malformed(
            path,
            line,
            format!("expected {expected_len} fields, found {len}"),
        ),
        other => Error::malformed(path, line, format!("{other:?}")),
    }
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON (`df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "tnow": 1.0e-8, "he4": 1.0e-20, "h1": 0.99 },
///   ...
/// ]
/// ```
///
/// Column order follows the keys of the first record as written; every later record
/// must carry exactly the same keys. Line numbers in errors are record
/// numbers (1-based).
fn load_json(path: &Path) -> Result<Table> {
    let text = read_text(path)?;
    let root: JsonValue =
        serde_json::from_str(&text).map_err(|e| Error::malformed(path, e.line(), e.to_string()))?;
    let records = root
        .as_array()
        .ok_or_else(|| Error::malformed(path, 1, "expected a top-level JSON array"))?;

    let Some(first) = records.first() else {
        return Ok(Table::default());
    };
    let names: Vec<String> = first
        .as_object()
        .ok_or_else(|| Error::malformed(path, 1, "record is not a JSON object"))?
        .keys()
        .cloned()
        .collect();

    let mut table = Table::with_columns(names.iter().cloned());
    let mut row = Vec::with_capacity(names.len());

    for (i, record) in records.iter().enumerate() {
        let record_no = i + 1;
        let obj = record
            .as_object()
            .ok_or_else(|| Error::malformed(path, record_no, "record is not a JSON object"))?;
        if obj.len() != names.len() {
            return Err(Error::malformed(
                path,
                record_no,
                format!("expected {} fields, found {}", names.len(), obj.len()),
            ));
        }
        row.clear();
        for name in &names {
            let value = obj
                .get(name)
                .ok_or_else(|| Error::malformed(path, record_no, format!("missing field '{name}'")))?
                .as_f64()
                .ok_or_else(|| Error::malformed(path, record_no, format!("'{name}' is not a number")))?;
            row.push(value);
        }
        table.push_row(&row);
    }

    Ok(table)
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file. Numeric columns are cast to `f64`; other columns are
/// skipped. Nulls are rejected since a table cell always holds a number.
fn load_parquet(path: &Path) -> Result<Table> {
    let file = File::open(path).map_err(|source| Error::FileNotFound {
        path: path.to_path_buf(),
        source,
    })?;
    let parquet_err = |source: ParquetError| Error::Parquet {
        path: path.to_path_buf(),
        source,
    };

    let builder = ParquetRecordBatchReaderBuilder::try_new(file).map_err(parquet_err)?;
    let numeric = numeric_columns(builder.schema(), path)?;
    let reader = builder.build().map_err(parquet_err)?;

    let mut columns: Vec<Vec<f64>> = vec![Vec::new(); numeric.len()];
    let mut rows_seen = 0usize;

    for batch in reader {
        let batch = batch.map_err(|e| parquet_err(ParquetError::ArrowError(e.to_string())))?;
        for ((idx, name), out) in numeric.iter().zip(columns.iter_mut()) {
            let cast = arrow::compute::cast(batch.column(*idx), &DataType::Float64)
                .map_err(|e| parquet_err(ParquetError::ArrowError(e.to_string())))?;
            let values = cast.as_primitive::<Float64Type>();
            if let Some(null_at) = (0..values.len()).find(|&i| values.is_null(i)) {
                return Err(Error::malformed(
                    path,
                    rows_seen + null_at + 1,
                    format!("null value in column '{name}'"),
                ));
            }
            out.extend(values.values().iter().copied());
        }
        rows_seen += batch.num_rows();
    }

    let pairs = numeric.into_iter().map(|(_, name)| name).zip(columns);
    // Parquet columns in one file always share a row count.
    Table::from_columns(pairs).map_err(|e| Error::malformed(path, 0, e.to_string()))
}

/// Index and name of every numeric field. Names must be unique, as for the
/// header of a text table.
fn numeric_columns(schema: &Schema, path: &Path) -> Result<Vec<(usize, String)>> {
    let numeric: Vec<(usize, String)> = schema
        .fields()
        .iter()
        .enumerate()
        .filter(|(_, f)| f.data_type().is_numeric())
        .map(|(i, f)| (i, f.name().clone()))
        .collect();
    let names: Vec<&str> = numeric.iter().map(|(_, name)| name.as_str()).collect();
    check_unique(&names, path, 1)?;
    Ok(numeric)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<Table> {
        parse_delimited(text, ' ', Path::new("test.dat"))
    }

    #[test]
    fn collapses_repeated_delimiters() {
        let table = parse("   tnow     he4\n  1.0000e+00   9.0000e-01\n").unwrap();
        assert_eq!(table.column_names(), ["tnow", "he4"]);
        assert_eq!(table.column("he4"), Some(&[0.9][..]));
    }

    #[test]
    fn header_only_gives_empty_columns() {
        let table = parse("tnow h1\n\n").unwrap();
        assert_eq!(table.n_columns(), 2);
        assert_eq!(table.n_rows(), 0);
    }

    #[test]
    fn skips_leading_blank_lines() {
        let table = parse("\n\ntnow h1\n1 2\n").unwrap();
        assert_eq!(table.n_rows(), 1);
    }

    #[test]
    fn short_row_is_malformed() {
        let err = parse("tnow h1\n1 2\n3\n").unwrap_err();
        match err {
            Error::MalformedRow { line, .. } => assert_eq!(line, 3),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn non_numeric_field_is_malformed() {
        let err = parse("tnow h1\n1 abc\n").unwrap_err();
        assert!(matches!(err, Error::MalformedRow { line: 2, .. }), "{err}");
    }

    #[test]
    fn duplicate_header_is_malformed() {
        let err = parse("tnow tnow\n1 2\n").unwrap_err();
        assert!(matches!(err, Error::MalformedRow { line: 1, .. }));
    }

    #[test]
    fn fortran_exponent() {
        assert_eq!(parse_value("1.5D-03"), Some(1.5e-3));
        assert_eq!(parse_value("nan-ish"), None);
    }

    #[test]
    fn tabs_separate_fields_with_whitespace_delimiter() {
        let table = parse("tnow\th1\n1.0\t0.5\n2.0 \t 0.25\n").unwrap();
        assert_eq!(table.column_names(), ["tnow", "h1"]);
        assert_eq!(table.column("h1"), Some(&[0.5, 0.25][..]));
    }

    #[test]
    fn invalid_utf8_is_malformed_on_its_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("binary.dat");
        std::fs::write(&path, b"tnow h1\n1.0 0.5\n1.0 \xff\xfe\n").unwrap();
        match load(&path, ' ') {
            Err(Error::MalformedRow { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected MalformedRow, got {other:?}"),
        }
    }

    #[test]
    fn duplicate_parquet_field_is_malformed() {
        use arrow::datatypes::Field;

        let schema = Schema::new(vec![
            Field::new("tnow", DataType::Float64, false),
            Field::new("label", DataType::Utf8, false),
            Field::new("tnow", DataType::Int32, false),
        ]);
        let err = numeric_columns(&schema, Path::new("dup.parquet")).unwrap_err();
        assert!(matches!(err, Error::MalformedRow { line: 1, .. }), "{err}");

        let schema = Schema::new(vec![
            Field::new("tnow", DataType::Float64, false),
            Field::new("tnow_label", DataType::Utf8, false),
            Field::new("h1", DataType::Float32, false),
        ]);
        let numeric = numeric_columns(&schema, Path::new("ok.parquet")).unwrap();
        assert_eq!(numeric, vec![(0, "tnow".to_string()), (2, "h1".to_string())]);
    }

    #[test]
    fn custom_delimiter() {
        let table = parse_delimited("t;x\n1;;2\n", ';', Path::new("t.txt")).unwrap();
        assert_eq!(table.column("x"), Some(&[2.0][..]));
    }
}
