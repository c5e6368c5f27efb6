use std::path::PathBuf;

/// Errors raised while loading a table or rendering the chart.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input file does not exist or cannot be read.
    #[error("cannot read {}: {source}", path.display())]
    FileNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A data row disagrees with the header or holds a non-numeric field.
    /// `line` is 1-based and counts every physical line of the file.
    #[error("{}:{line}: {reason}", path.display())]
    MalformedRow {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    /// A species column required by the chart is absent from the table.
    #[error("table has no column named '{column}'")]
    MissingColumn { column: String },

    /// No interactive display backend could be started.
    #[error("no display available: {0}")]
    DisplayUnavailable(String),

    /// Error from the Parquet library while reading a columnar table
    #[error("parquet error in {}: {source}", path.display())]
    Parquet {
        path: PathBuf,
        #[source]
        source: parquet::errors::ParquetError,
    },

    /// The rendered chart could not be written to disk.
    #[error("cannot export chart to {}: {reason}", path.display())]
    Export { path: PathBuf, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn malformed(path: &std::path::Path, line: usize, reason: impl Into<String>) -> Self {
        Error::MalformedRow {
            path: path.to_path_buf(),
            line,
            reason: reason.into(),
        }
    }
}
