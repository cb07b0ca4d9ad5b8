/// Data layer: table types, loading, and writing.
///
/// Architecture:
/// ```text
///  train_processed.csv / test_processed.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader  │  parse file, blank missing cells → Table
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Table   │  named columns, Vec<Vec<Value>> rows
///   └──────────┘
///        │   (features::stage)
///        ▼
///   ┌──────────┐
///   │  writer  │  ensure parent dir, write CSV without index
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod writer;
