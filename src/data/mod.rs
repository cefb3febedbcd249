/// Data layer: core types, loading, and selection.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  Vec<Record>, region index
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ selection  │  region → countries, country + metric → series / mean
///   └───────────┘
/// ```

pub mod loader;
pub mod model;
pub mod selection;
