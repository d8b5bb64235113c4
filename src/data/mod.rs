/// Data layer: core types, loading, and the typed load errors.
///
/// Architecture:
/// ```text
///   india.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse CSV → Dataset (per-column type inference)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  columns + rectangular rows, immutable
///   └──────────┘
/// ```

pub mod error;
pub mod loader;
pub mod model;

pub use error::LoadError;
pub use loader::load_csv;
pub use model::{CellValue, Column, ColumnType, Dataset};
