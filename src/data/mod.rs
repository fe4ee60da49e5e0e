/// Data layer: core types, loading, and filtering.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → LaunchTable
///   └──────────┘
///        │
///        ▼
///   ┌─────────────┐
///   │ LaunchTable │  Vec<LaunchRecord>, payload bounds, booster categories
///   └─────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  site options; site + payload predicates → Subset
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod filter;
