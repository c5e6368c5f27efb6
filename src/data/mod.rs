/// Data layer: the in-memory table plus its readers and writer.
///
/// Architecture:
/// ```text
///  results.dat / .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader  │  parse file → Table
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Table   │  named f64 columns, file row order
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  writer  │  Table → fixed-width text (burn network output)
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod writer;

pub use loader::{load, load_file};
pub use model::Table;
pub use writer::write_table;
