use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use super::model::Table;

/// Width of one right-aligned field in the text format.
const FIELD_WIDTH: usize = 15;

/// Write a table in the whitespace-separated format read by
/// [`load`](super::loader::load): a header line, then one line per row with
/// every value in scientific notation (4 fractional digits).
pub fn write_table(path: &Path, table: &Table) -> io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    write_to(&mut out, table)?;
    out.flush()
}

/// Same as [`write_table`] but into any writer.
pub fn write_to<W: Write>(out: &mut W, table: &Table) -> io::Result<()> {
    let header: Vec<String> = table
        .column_names()
        .iter()
        .map(|name| format!("{name:>FIELD_WIDTH$}"))
        .collect();
    writeln!(out, "{}", header.join(" "))?;

    for i in 0..table.n_rows() {
        let Some(row) = table.row(i) else { break };
        let fields: Vec<String> = row.iter().map(|&v| format_value(v)).collect();
        writeln!(out, "{}", fields.join(" "))?;
    }
    Ok(())
}

/// `1.0000e-08` style: two-digit signed exponent, padded to the field width.
fn format_value(value: f64) -> String {
    let raw = format!("{value:.4e}");
    let formatted = match raw.split_once('e') {
        Some((mantissa, exp)) => {
            let (sign, digits) = match exp.strip_prefix('-') {
                Some(d) => ('-', d),
                None => ('+', exp),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        // inf / NaN have no exponent
        None => raw,
    };
    format!("{formatted:>FIELD_WIDTH$}")
}
