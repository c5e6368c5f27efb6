// ---------------------------------------------------------------------------
// Table – the loaded simulation output
// ---------------------------------------------------------------------------

/// Column-addressable table of floating-point values.
///
/// One column per header field, one row per recorded time step. Every column
/// has the same length and rows keep the order of the source file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    names: Vec<String>,
    columns: Vec<Vec<f64>>,
}

/// Column lengths disagree when assembling a [`Table`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("column '{column}' has {found} values, expected {expected}")]
pub struct RaggedColumns {
    pub column: String,
    pub expected: usize,
    pub found: usize,
}

impl Table {
    /// Empty table with the given column names and no rows.
    pub fn with_columns<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        let columns = vec![Vec::new(); names.len()];
        Table { names, columns }
    }

    /// Build a table from `(name, values)` pairs, checking lengths agree.
    pub fn from_columns<I, S>(pairs: I) -> Result<Self, RaggedColumns>
    where
        I: IntoIterator<Item = (S, Vec<f64>)>,
        S: Into<String>,
    {
        let mut table = Table::default();
        for (name, values) in pairs {
            let name = name.into();
            if let Some(first) = table.columns.first() {
                if first.len() != values.len() {
                    return Err(RaggedColumns {
                        column: name,
                        expected: first.len(),
                        found: values.len(),
                    });
                }
            }
            table.names.push(name);
            table.columns.push(values);
        }
        Ok(table)
    }

    /// Append one row. The caller guarantees `row.len() == n_columns()`.
    pub(crate) fn push_row(&mut self, row: &[f64]) {
        debug_assert_eq!(row.len(), self.columns.len());
        for (column, &value) in self.columns.iter_mut().zip(row) {
            column.push(value);
        }
    }

    /// Values of the named column, if present.
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| self.columns[i].as_slice())
    }

    /// Column names in header order.
    pub fn column_names(&self) -> &[String] {
        &self.names
    }

    pub fn n_columns(&self) -> usize {
        self.names.len()
    }

    /// Number of rows (zero for a table without columns).
    pub fn n_rows(&self) -> usize {
        self.columns.first().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.n_rows() == 0
    }

    /// One row across all columns, in header order.
    pub fn row(&self, index: usize) -> Option<Vec<f64>> {
        if index >= self.n_rows() {
            return None;
        }
        Some(self.columns.iter().map(|c| c[index]).collect())
    }

    /// Whether the named column never decreases from one row to the next.
    /// `None` when the column does not exist.
    pub fn is_non_decreasing(&self, name: &str) -> Option<bool> {
        self.column(name)
            .map(|values| values.windows(2).all(|w| w[0] <= w[1]))
    }
}
