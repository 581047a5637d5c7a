/// Data layer: catalog types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  file → raw rows
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ normalize  │  raw rows → Catalog (Vec<Record> + LoadReport)
///   └───────────┘
///        │
///        ├──────────────► universe   genre / status options (once per load)
///        ▼
///   ┌──────────┐
///   │  filter   │  FilterState predicate → filtered records
///   └──────────┘
///        │
///        ├──────────────► projection  scatter points
///        ▼
///   ┌──────────┐
///   │  matrix   │  (year, genre) → average rating
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod matrix;
pub mod model;
pub mod normalize;
pub mod projection;
pub mod universe;
