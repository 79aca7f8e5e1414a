/// Data layer: core types and loading.
///
/// Architecture:
/// ```text
///  .arff / .csv / .txt
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset (+ ColumnMeta for ARFF)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  named columns, rectangular rows of Value
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
